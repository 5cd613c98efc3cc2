use crate::repository::errors::RecipeRepositoryError;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RecipeServiceError {
    #[error("email already exists")]
    EmailAlreadyExists,

    #[error("validation error: {0}")]
    Validation(String),

    #[error("invalid reference: {0}")]
    InvalidReference(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<RecipeRepositoryError> for RecipeServiceError {
    fn from(err: RecipeRepositoryError) -> Self {
        match err {
            RecipeRepositoryError::EmailAlreadyExists => RecipeServiceError::EmailAlreadyExists,
            RecipeRepositoryError::InvalidReference => {
                RecipeServiceError::InvalidReference("referenced row does not exist".to_string())
            }
            RecipeRepositoryError::TokenAlreadyExists => {
                RecipeServiceError::Internal(anyhow::anyhow!("generated token collided"))
            }
            RecipeRepositoryError::Sqlx(e) => RecipeServiceError::Internal(e.into()),
        }
    }
}
