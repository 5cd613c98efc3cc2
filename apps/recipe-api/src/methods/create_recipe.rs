use axum::{extract::State, http::StatusCode, Json};
use recipe_lib::entities::NewRecipe;
use recipe_lib::repository::traits::{
    IngredientRepositoryTrait, RecipeRepositoryTrait, TagRepositoryTrait, UserRepositoryTrait,
};
use validator::Validate;

use crate::auth::AuthUser;
use crate::error::{handle_service_error, ApiError};
use crate::extract::JsonOrForm;
use crate::methods::entities::{CreateRecipeRequest, RecipeResponse};
use crate::methods::routes::RECIPES_PATH;
use crate::state::AppState;

/// Ingredient and tag ids must belong to the caller; duplicates are collapsed.
#[utoipa::path(
    post,
    path = RECIPES_PATH,
    tag = "recipes",
    request_body(content(
        (CreateRecipeRequest = "application/json"),
        (CreateRecipeRequest = "application/x-www-form-urlencoded")
    )),
    security(("token" = [])),
    responses(
        (status = 201, description = "Recipe created", body = RecipeResponse),
        (status = 400, description = "Validation error or unknown ingredient/tag reference"),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn create_recipe<U, I, T, R>(
    State(state): State<AppState<U, I, T, R>>,
    AuthUser(user): AuthUser,
    JsonOrForm(payload): JsonOrForm<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), ApiError>
where
    U: UserRepositoryTrait + 'static,
    I: IngredientRepositoryTrait + 'static,
    T: TagRepositoryTrait + 'static,
    R: RecipeRepositoryTrait + 'static,
{
    payload.validate()?;

    let recipe = state
        .recipe_service
        .create_recipe(user.id, NewRecipe::from(payload))
        .await
        .map_err(|e| handle_service_error(e, &state.env, "create_recipe"))?;

    tracing::info!(user_id = user.id, recipe_id = recipe.id, "recipe created");
    Ok((StatusCode::CREATED, Json(RecipeResponse::from(recipe))))
}
