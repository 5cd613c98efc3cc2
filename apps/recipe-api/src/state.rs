use std::sync::Arc;
use recipe_lib::recipe_service::RecipeService;
use recipe_lib::repository::traits::{
    IngredientRepositoryTrait, RecipeRepositoryTrait, TagRepositoryTrait, UserRepositoryTrait,
};
use recipe_lib::repository::{IngredientRepository, RecipeRepository, TagRepository, UserRepository};

pub struct AppState<
    U = UserRepository,
    I = IngredientRepository,
    T = TagRepository,
    R = RecipeRepository,
> where
    U: UserRepositoryTrait + 'static,
    I: IngredientRepositoryTrait + 'static,
    T: TagRepositoryTrait + 'static,
    R: RecipeRepositoryTrait + 'static,
{
    pub recipe_service: Arc<RecipeService<U, I, T, R>>,
    pub env: String,
}

impl<U, I, T, R> AppState<U, I, T, R>
where
    U: UserRepositoryTrait + 'static,
    I: IngredientRepositoryTrait + 'static,
    T: TagRepositoryTrait + 'static,
    R: RecipeRepositoryTrait + 'static,
{
    pub fn new(recipe_service: RecipeService<U, I, T, R>, env: impl Into<String>) -> Self {
        Self {
            recipe_service: Arc::new(recipe_service),
            env: env.into(),
        }
    }
}

// Manual impl: the repositories themselves need not be Clone.
impl<U, I, T, R> Clone for AppState<U, I, T, R>
where
    U: UserRepositoryTrait + 'static,
    I: IngredientRepositoryTrait + 'static,
    T: TagRepositoryTrait + 'static,
    R: RecipeRepositoryTrait + 'static,
{
    fn clone(&self) -> Self {
        Self {
            recipe_service: Arc::clone(&self.recipe_service),
            env: self.env.clone(),
        }
    }
}
