use async_trait::async_trait;
use sqlx::{query, query_as, MySqlPool};

use crate::repository::errors::RecipeRepositoryError;
use crate::repository::models::UserRow;
use crate::repository::traits::UserRepositoryTrait;

#[derive(Debug, Clone)]
pub struct UserRepository {
    pub pool: MySqlPool,
}

impl UserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn create_user(&self, email: &str, name: &str, token: &str) -> Result<UserRow, RecipeRepositoryError> {
        let result = query(
            r#"
            INSERT INTO users (email, name, token)
            VALUES (?, ?, ?)
            "#
        )
        .bind(email)
        .bind(name)
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(RecipeRepositoryError::from)?;

        let user = query_as::<_, UserRow>(
            r#"
            SELECT id, email, name FROM users WHERE id = ?
            "#
        )
        .bind(result.last_insert_id() as i64)
        .fetch_one(&self.pool)
        .await
        .map_err(RecipeRepositoryError::from)?;

        Ok(user)
    }

    async fn get_user_by_token(&self, token: &str) -> Result<Option<UserRow>, RecipeRepositoryError> {
        let user = query_as::<_, UserRow>(
            r#"
            SELECT id, email, name FROM users WHERE token = ?
            "#
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(RecipeRepositoryError::from)?;

        Ok(user)
    }
}
