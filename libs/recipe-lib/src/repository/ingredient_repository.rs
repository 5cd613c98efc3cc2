use async_trait::async_trait;
use sqlx::{query, query_as, MySql, MySqlPool, QueryBuilder};

use crate::entities::AttributeFilter;
use crate::repository::errors::{map_sqlx_error, RecipeRepositoryError};
use crate::repository::models::IngredientRow;
use crate::repository::traits::IngredientRepositoryTrait;

#[derive(Debug, Clone)]
pub struct IngredientRepository {
    pub pool: MySqlPool,
}

impl IngredientRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IngredientRepositoryTrait for IngredientRepository {
    async fn create_ingredient(&self, user_id: i64, name: &str) -> Result<IngredientRow, RecipeRepositoryError> {
        let result = query(
            r#"
            INSERT INTO ingredients (user_id, name)
            VALUES (?, ?)
            "#
        )
        .bind(user_id)
        .bind(name)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let ingredient = query_as::<_, IngredientRow>(
            r#"SELECT id, name FROM ingredients WHERE id = ? "#
        )
        .bind(result.last_insert_id() as i64)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(ingredient)
    }

    async fn get_ingredients(&self, user_id: i64, filter: AttributeFilter) -> Result<Vec<IngredientRow>, RecipeRepositoryError> {
        // The join fans out once per referencing recipe, DISTINCT folds it back.
        let sql = if filter.assigned_only {
            r#"
            SELECT DISTINCT i.id, i.name
            FROM ingredients i
            INNER JOIN recipe_ingredients ri ON ri.ingredient_id = i.id
            WHERE i.user_id = ?
            ORDER BY i.name DESC, i.id DESC
            "#
        } else {
            r#"
            SELECT i.id, i.name
            FROM ingredients i
            WHERE i.user_id = ?
            ORDER BY i.name DESC, i.id DESC
            "#
        };

        let ingredients = query_as::<_, IngredientRow>(sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(ingredients)
    }

    async fn get_ingredients_by_ids(&self, user_id: i64, ids: &[i64]) -> Result<Vec<IngredientRow>, RecipeRepositoryError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let mut builder = QueryBuilder::<MySql>::new("SELECT id, name FROM ingredients WHERE user_id = ");
        builder.push_bind(user_id);
        builder.push(" AND id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let ingredients = builder
            .build_query_as::<IngredientRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(ingredients)
    }

    async fn get_ingredients_for_recipe(&self, recipe_id: i64) -> Result<Vec<IngredientRow>, RecipeRepositoryError> {
        let ingredients = query_as::<_, IngredientRow>(
            r#"
            SELECT i.id, i.name
            FROM ingredients i
            INNER JOIN recipe_ingredients ri ON ri.ingredient_id = i.id
            WHERE ri.recipe_id = ?
            ORDER BY i.id
            "#
        )
        .bind(recipe_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(ingredients)
    }
}
