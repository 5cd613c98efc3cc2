pub mod user_repository;
pub mod ingredient_repository;
pub mod tag_repository;
pub mod recipe_repository;
pub mod models;
pub mod errors;
pub mod traits;

pub use user_repository::UserRepository;
pub use ingredient_repository::IngredientRepository;
pub use tag_repository::TagRepository;
pub use recipe_repository::RecipeRepository;
pub use errors::RecipeRepositoryError;
