use axum::{extract::State, Json};
use recipe_lib::repository::traits::{
    IngredientRepositoryTrait, RecipeRepositoryTrait, TagRepositoryTrait, UserRepositoryTrait,
};

use crate::auth::AuthUser;
use crate::error::{handle_service_error, ApiError};
use crate::methods::entities::RecipeResponse;
use crate::methods::routes::RECIPES_PATH;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = RECIPES_PATH,
    tag = "recipes",
    security(("token" = [])),
    responses(
        (status = 200, description = "Recipes owned by the caller, newest first", body = Vec<RecipeResponse>),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn get_recipes<U, I, T, R>(
    State(state): State<AppState<U, I, T, R>>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<RecipeResponse>>, ApiError>
where
    U: UserRepositoryTrait + 'static,
    I: IngredientRepositoryTrait + 'static,
    T: TagRepositoryTrait + 'static,
    R: RecipeRepositoryTrait + 'static,
{
    state
        .recipe_service
        .list_recipes(user.id)
        .await
        .map(|recipes| Json(recipes.into_iter().map(RecipeResponse::from).collect()))
        .map_err(|e| handle_service_error(e, &state.env, "get_recipes"))
}
