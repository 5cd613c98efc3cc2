pub mod entities;
pub mod routes;
pub mod health_check;
pub mod list_ingredients;
pub mod create_ingredient;
pub mod list_tags;
pub mod create_tag;
pub mod get_recipes;
pub mod get_recipe_by_id;
pub mod create_recipe;
