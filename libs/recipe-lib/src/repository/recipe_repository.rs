use async_trait::async_trait;
use sqlx::{query, query_as, MySql, MySqlPool, QueryBuilder};

use crate::entities::NewRecipe;
use crate::repository::errors::{map_sqlx_error, RecipeRepositoryError};
use crate::repository::models::{RecipeLinkRow, RecipeRow};
use crate::repository::traits::RecipeRepositoryTrait;

#[derive(Debug, Clone)]
pub struct RecipeRepository {
    pub pool: MySqlPool,
}

impl RecipeRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn get_links(
        &self,
        table: &str,
        column: &str,
        recipe_ids: &[i64],
    ) -> Result<Vec<RecipeLinkRow>, RecipeRepositoryError> {
        if recipe_ids.is_empty() {
            return Ok(vec![]);
        }

        let mut builder = QueryBuilder::<MySql>::new(format!(
            "SELECT recipe_id, {column} AS target_id FROM {table} WHERE recipe_id IN ("
        ));
        let mut separated = builder.separated(", ");
        for id in recipe_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(format!(") ORDER BY recipe_id, {column}"));

        let links = builder
            .build_query_as::<RecipeLinkRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(links)
    }
}

#[async_trait]
impl RecipeRepositoryTrait for RecipeRepository {
    async fn create_recipe(&self, user_id: i64, recipe: &NewRecipe) -> Result<RecipeRow, RecipeRepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let result = query(
            r#"
            INSERT INTO recipes (user_id, title, time_minutes, price, link)
            VALUES (?, ?, ?, ?, ?)
            "#
        )
        .bind(user_id)
        .bind(&recipe.title)
        .bind(recipe.time_minutes)
        .bind(recipe.price)
        .bind(recipe.link.as_deref().unwrap_or_default())
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;
        let recipe_id = result.last_insert_id() as i64;

        for ingredient_id in &recipe.ingredients {
            query(
                r#"
                INSERT INTO recipe_ingredients (recipe_id, ingredient_id)
                VALUES (?, ?)
                "#
            )
            .bind(recipe_id)
            .bind(ingredient_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        }

        for tag_id in &recipe.tags {
            query(
                r#"
                INSERT INTO recipe_tags (recipe_id, tag_id)
                VALUES (?, ?)
                "#
            )
            .bind(recipe_id)
            .bind(tag_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        }

        tx.commit().await.map_err(map_sqlx_error)?;

        let row = query_as::<_, RecipeRow>(
            r#"SELECT id, title, time_minutes, price, link FROM recipes WHERE id = ? "#
        )
        .bind(recipe_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(row)
    }

    async fn get_recipe(&self, user_id: i64, recipe_id: i64) -> Result<Option<RecipeRow>, RecipeRepositoryError> {
        let row = query_as::<_, RecipeRow>(
            r#"
            SELECT id, title, time_minutes, price, link
            FROM recipes
            WHERE id = ? AND user_id = ?
            "#
        )
        .bind(recipe_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(row)
    }

    async fn get_recipes(&self, user_id: i64) -> Result<Vec<RecipeRow>, RecipeRepositoryError> {
        let rows = query_as::<_, RecipeRow>(
            r#"
            SELECT id, title, time_minutes, price, link
            FROM recipes
            WHERE user_id = ?
            ORDER BY id DESC
            "#
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(rows)
    }

    async fn get_ingredient_links(&self, recipe_ids: &[i64]) -> Result<Vec<RecipeLinkRow>, RecipeRepositoryError> {
        self.get_links("recipe_ingredients", "ingredient_id", recipe_ids).await
    }

    async fn get_tag_links(&self, recipe_ids: &[i64]) -> Result<Vec<RecipeLinkRow>, RecipeRepositoryError> {
        self.get_links("recipe_tags", "tag_id", recipe_ids).await
    }
}
