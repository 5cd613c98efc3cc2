use async_trait::async_trait;

use crate::entities::{AttributeFilter, NewRecipe};
use crate::repository::errors::RecipeRepositoryError;
use crate::repository::models::{IngredientRow, RecipeLinkRow, RecipeRow, TagRow, UserRow};

#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    async fn create_user(&self, email: &str, name: &str, token: &str) -> Result<UserRow, RecipeRepositoryError>;
    async fn get_user_by_token(&self, token: &str) -> Result<Option<UserRow>, RecipeRepositoryError>;
}

#[async_trait]
pub trait IngredientRepositoryTrait: Send + Sync {
    async fn create_ingredient(&self, user_id: i64, name: &str) -> Result<IngredientRow, RecipeRepositoryError>;
    async fn get_ingredients(&self, user_id: i64, filter: AttributeFilter) -> Result<Vec<IngredientRow>, RecipeRepositoryError>;
    async fn get_ingredients_by_ids(&self, user_id: i64, ids: &[i64]) -> Result<Vec<IngredientRow>, RecipeRepositoryError>;
    async fn get_ingredients_for_recipe(&self, recipe_id: i64) -> Result<Vec<IngredientRow>, RecipeRepositoryError>;
}

#[async_trait]
pub trait TagRepositoryTrait: Send + Sync {
    async fn create_tag(&self, user_id: i64, name: &str) -> Result<TagRow, RecipeRepositoryError>;
    async fn get_tags(&self, user_id: i64, filter: AttributeFilter) -> Result<Vec<TagRow>, RecipeRepositoryError>;
    async fn get_tags_by_ids(&self, user_id: i64, ids: &[i64]) -> Result<Vec<TagRow>, RecipeRepositoryError>;
    async fn get_tags_for_recipe(&self, recipe_id: i64) -> Result<Vec<TagRow>, RecipeRepositoryError>;
}

#[async_trait]
pub trait RecipeRepositoryTrait: Send + Sync {
    async fn create_recipe(&self, user_id: i64, recipe: &NewRecipe) -> Result<RecipeRow, RecipeRepositoryError>;
    async fn get_recipe(&self, user_id: i64, recipe_id: i64) -> Result<Option<RecipeRow>, RecipeRepositoryError>;
    async fn get_recipes(&self, user_id: i64) -> Result<Vec<RecipeRow>, RecipeRepositoryError>;
    async fn get_ingredient_links(&self, recipe_ids: &[i64]) -> Result<Vec<RecipeLinkRow>, RecipeRepositoryError>;
    async fn get_tag_links(&self, recipe_ids: &[i64]) -> Result<Vec<RecipeLinkRow>, RecipeRepositoryError>;
}
