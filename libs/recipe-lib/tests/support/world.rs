use async_trait::async_trait;
use cucumber::World;
use mockall::mock;
use std::sync::{Arc, Mutex};

use recipe_lib::entities::{AttributeFilter, Ingredient, NewRecipe};
use recipe_lib::errors_service::RecipeServiceError;
use recipe_lib::recipe_service::RecipeService;
use recipe_lib::repository::errors::RecipeRepositoryError;
use recipe_lib::repository::models::{IngredientRow, RecipeLinkRow, RecipeRow, TagRow, UserRow};
use recipe_lib::repository::traits::{
    IngredientRepositoryTrait, RecipeRepositoryTrait, TagRepositoryTrait, UserRepositoryTrait,
};

// Mock repositories
mock! {
    #[derive(Debug)]
    pub UserRepo {}

    #[async_trait]
    impl UserRepositoryTrait for UserRepo {
        async fn create_user(&self, email: &str, name: &str, token: &str) -> Result<UserRow, RecipeRepositoryError>;
        async fn get_user_by_token(&self, token: &str) -> Result<Option<UserRow>, RecipeRepositoryError>;
    }
}

mock! {
    #[derive(Debug)]
    pub IngredientRepo {}

    #[async_trait]
    impl IngredientRepositoryTrait for IngredientRepo {
        async fn create_ingredient(&self, user_id: i64, name: &str) -> Result<IngredientRow, RecipeRepositoryError>;
        async fn get_ingredients(&self, user_id: i64, filter: AttributeFilter) -> Result<Vec<IngredientRow>, RecipeRepositoryError>;
        async fn get_ingredients_by_ids(&self, user_id: i64, ids: &[i64]) -> Result<Vec<IngredientRow>, RecipeRepositoryError>;
        async fn get_ingredients_for_recipe(&self, recipe_id: i64) -> Result<Vec<IngredientRow>, RecipeRepositoryError>;
    }
}

mock! {
    #[derive(Debug)]
    pub TagRepo {}

    #[async_trait]
    impl TagRepositoryTrait for TagRepo {
        async fn create_tag(&self, user_id: i64, name: &str) -> Result<TagRow, RecipeRepositoryError>;
        async fn get_tags(&self, user_id: i64, filter: AttributeFilter) -> Result<Vec<TagRow>, RecipeRepositoryError>;
        async fn get_tags_by_ids(&self, user_id: i64, ids: &[i64]) -> Result<Vec<TagRow>, RecipeRepositoryError>;
        async fn get_tags_for_recipe(&self, recipe_id: i64) -> Result<Vec<TagRow>, RecipeRepositoryError>;
    }
}

mock! {
    #[derive(Debug)]
    pub RecipeRepo {}

    #[async_trait]
    impl RecipeRepositoryTrait for RecipeRepo {
        async fn create_recipe(&self, user_id: i64, recipe: &NewRecipe) -> Result<RecipeRow, RecipeRepositoryError>;
        async fn get_recipe(&self, user_id: i64, recipe_id: i64) -> Result<Option<RecipeRow>, RecipeRepositoryError>;
        async fn get_recipes(&self, user_id: i64) -> Result<Vec<RecipeRow>, RecipeRepositoryError>;
        async fn get_ingredient_links(&self, recipe_ids: &[i64]) -> Result<Vec<RecipeLinkRow>, RecipeRepositoryError>;
        async fn get_tag_links(&self, recipe_ids: &[i64]) -> Result<Vec<RecipeLinkRow>, RecipeRepositoryError>;
    }
}

#[derive(Debug, Clone)]
pub struct StoredIngredient {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
}

/// Rows the mocked ingredient repository answers from. Filtering and
/// ordering belong to the SQL query, so the store only scopes by owner and
/// remembers which filter it was handed.
#[derive(Debug, Default)]
pub struct FakeStore {
    pub next_id: i64,
    pub ingredients: Vec<StoredIngredient>,
    pub last_filter: Option<AttributeFilter>,
}

impl FakeStore {
    pub fn insert(&mut self, user_id: i64, name: &str) -> IngredientRow {
        self.next_id += 1;
        self.ingredients.push(StoredIngredient {
            id: self.next_id,
            user_id,
            name: name.to_string(),
        });
        IngredientRow {
            id: self.next_id,
            name: name.to_string(),
        }
    }

    pub fn select(&mut self, user_id: i64, filter: AttributeFilter) -> Vec<IngredientRow> {
        self.last_filter = Some(filter);
        self.ingredients
            .iter()
            .filter(|i| i.user_id == user_id)
            .map(|i| IngredientRow {
                id: i.id,
                name: i.name.clone(),
            })
            .collect()
    }
}

#[derive(Debug, Default, World)]
pub struct TestWorld {
    // State
    pub current_user_id: i64,
    pub other_user_id: i64,
    pub store: Arc<Mutex<FakeStore>>,
    pub stored_before: usize,

    // Results
    pub list_result: Option<Result<Vec<Ingredient>, RecipeServiceError>>,
    pub create_result: Option<Result<Ingredient, RecipeServiceError>>,
}

impl TestWorld {
    pub fn stored_count(&self) -> usize {
        self.store.lock().map(|s| s.ingredients.len()).unwrap_or_default()
    }

    /// Service whose ingredient repository reads and writes the fake store.
    pub fn create_service(&self) -> RecipeService<MockUserRepo, MockIngredientRepo, MockTagRepo, MockRecipeRepo> {
        let mut ingredient_repo = MockIngredientRepo::new();

        let store = Arc::clone(&self.store);
        ingredient_repo
            .expect_create_ingredient()
            .returning(move |user_id, name| Ok(store.lock().unwrap().insert(user_id, name)));

        let store = Arc::clone(&self.store);
        ingredient_repo
            .expect_get_ingredients()
            .returning(move |user_id, filter| Ok(store.lock().unwrap().select(user_id, filter)));

        RecipeService::with_repos(
            Arc::new(MockUserRepo::new()),
            Arc::new(ingredient_repo),
            Arc::new(MockTagRepo::new()),
            Arc::new(MockRecipeRepo::new()),
        )
    }
}
