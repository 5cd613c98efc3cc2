use async_trait::async_trait;
use sqlx::{query, query_as, MySql, MySqlPool, QueryBuilder};

use crate::entities::AttributeFilter;
use crate::repository::errors::{map_sqlx_error, RecipeRepositoryError};
use crate::repository::models::TagRow;
use crate::repository::traits::TagRepositoryTrait;

#[derive(Debug, Clone)]
pub struct TagRepository {
    pub pool: MySqlPool,
}

impl TagRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepositoryTrait for TagRepository {
    async fn create_tag(&self, user_id: i64, name: &str) -> Result<TagRow, RecipeRepositoryError> {
        let result = query(
            r#"
            INSERT INTO tags (user_id, name)
            VALUES (?, ?)
            "#
        )
        .bind(user_id)
        .bind(name)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let tag = query_as::<_, TagRow>(
            r#"SELECT id, name FROM tags WHERE id = ? "#
        )
        .bind(result.last_insert_id() as i64)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(tag)
    }

    async fn get_tags(&self, user_id: i64, filter: AttributeFilter) -> Result<Vec<TagRow>, RecipeRepositoryError> {
        let sql = if filter.assigned_only {
            r#"
            SELECT DISTINCT t.id, t.name
            FROM tags t
            INNER JOIN recipe_tags rt ON rt.tag_id = t.id
            WHERE t.user_id = ?
            ORDER BY t.name DESC, t.id DESC
            "#
        } else {
            r#"
            SELECT t.id, t.name
            FROM tags t
            WHERE t.user_id = ?
            ORDER BY t.name DESC, t.id DESC
            "#
        };

        let tags = query_as::<_, TagRow>(sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(tags)
    }

    async fn get_tags_by_ids(&self, user_id: i64, ids: &[i64]) -> Result<Vec<TagRow>, RecipeRepositoryError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let mut builder = QueryBuilder::<MySql>::new("SELECT id, name FROM tags WHERE user_id = ");
        builder.push_bind(user_id);
        builder.push(" AND id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let tags = builder
            .build_query_as::<TagRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(tags)
    }

    async fn get_tags_for_recipe(&self, recipe_id: i64) -> Result<Vec<TagRow>, RecipeRepositoryError> {
        let tags = query_as::<_, TagRow>(
            r#"
            SELECT t.id, t.name
            FROM tags t
            INNER JOIN recipe_tags rt ON rt.tag_id = t.id
            WHERE rt.recipe_id = ?
            ORDER BY t.id
            "#
        )
        .bind(recipe_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(tags)
    }
}
