pub mod auth;
pub mod config;
pub mod constants;
pub mod error;
pub mod extract;
pub mod methods;
pub mod shutdown;
pub mod state;

use axum::{routing::get, Router};
use recipe_lib::repository::traits::{
    IngredientRepositoryTrait, RecipeRepositoryTrait, TagRepositoryTrait, UserRepositoryTrait,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::methods::create_ingredient::{__path_create_ingredient, create_ingredient};
use crate::methods::create_recipe::{__path_create_recipe, create_recipe};
use crate::methods::create_tag::{__path_create_tag, create_tag};
use crate::methods::entities::{
    CreateIngredientRequest, CreateRecipeRequest, CreateTagRequest, IngredientResponse,
    RecipeDetailResponse, RecipeResponse, TagResponse,
};
use crate::methods::get_recipe_by_id::{__path_get_recipe_by_id, get_recipe_by_id};
use crate::methods::get_recipes::{__path_get_recipes, get_recipes};
use crate::methods::health_check::{__path_health_check, health_check};
use crate::methods::list_ingredients::{__path_list_ingredients, list_ingredients};
use crate::methods::list_tags::{__path_list_tags, list_tags};
use crate::methods::routes::{
    API_V1_PREFIX, INGREDIENTS_PATH, RECIPES_BY_ID_PATH, RECIPES_PATH, SERVICE_HEALTH_PATH,
    TAGS_PATH,
};
use crate::state::AppState;

struct TokenSecurity;

impl Modify for TokenSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "token",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "Authorization",
                    "Token <key>",
                ))),
            );
        }
    }
}

/// Operations served under `API_V1_PREFIX`.
#[derive(OpenApi)]
#[openapi(paths(
    list_ingredients, create_ingredient,
    list_tags, create_tag,
    get_recipes, get_recipe_by_id, create_recipe
))]
struct V1Api;

#[derive(OpenApi)]
#[openapi(
    paths(health_check),
    nest((path = "/v1", api = V1Api)),
    components(schemas(
        CreateIngredientRequest, IngredientResponse,
        CreateTagRequest, TagResponse,
        CreateRecipeRequest, RecipeResponse, RecipeDetailResponse
    )),
    modifiers(&TokenSecurity),
    tags(
        (name = "ingredients", description = "Per-user ingredient endpoints"),
        (name = "tags", description = "Per-user tag endpoints"),
        (name = "recipes", description = "Per-user recipe endpoints")
    )
)]
pub struct ApiDoc;

/// Versioned API plus health check. Docs and middleware are layered on in `main`.
pub fn app<U, I, T, R>(state: AppState<U, I, T, R>) -> Router
where
    U: UserRepositoryTrait + 'static,
    I: IngredientRepositoryTrait + 'static,
    T: TagRepositoryTrait + 'static,
    R: RecipeRepositoryTrait + 'static,
{
    let v1_routes = Router::new()
        .route(
            INGREDIENTS_PATH,
            get(list_ingredients::<U, I, T, R>).post(create_ingredient::<U, I, T, R>),
        )
        .route(
            TAGS_PATH,
            get(list_tags::<U, I, T, R>).post(create_tag::<U, I, T, R>),
        )
        .route(
            RECIPES_PATH,
            get(get_recipes::<U, I, T, R>).post(create_recipe::<U, I, T, R>),
        )
        .route(RECIPES_BY_ID_PATH, get(get_recipe_by_id::<U, I, T, R>));

    Router::new()
        .nest(API_V1_PREFIX, v1_routes)
        .route(SERVICE_HEALTH_PATH, get(health_check))
        .with_state(state)
}
