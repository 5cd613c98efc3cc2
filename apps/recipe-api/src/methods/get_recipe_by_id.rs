use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use recipe_lib::repository::traits::{
    IngredientRepositoryTrait, RecipeRepositoryTrait, TagRepositoryTrait, UserRepositoryTrait,
};

use crate::auth::AuthUser;
use crate::error::{handle_service_error, ApiError};
use crate::methods::entities::RecipeDetailResponse;
use crate::methods::routes::RECIPES_BY_ID_PATH;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = RECIPES_BY_ID_PATH,
    tag = "recipes",
    params(
        ("id" = i64, Path, description = "Recipe id")
    ),
    security(("token" = [])),
    responses(
        (status = 200, description = "Recipe with its ingredients and tags", body = RecipeDetailResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Recipe not found"),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn get_recipe_by_id<U, I, T, R>(
    State(state): State<AppState<U, I, T, R>>,
    AuthUser(user): AuthUser,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<RecipeDetailResponse>, ApiError>
where
    U: UserRepositoryTrait + 'static,
    I: IngredientRepositoryTrait + 'static,
    T: TagRepositoryTrait + 'static,
    R: RecipeRepositoryTrait + 'static,
{
    // A non-numeric id cannot name a recipe.
    let Ok(Path(recipe_id)) = id else {
        return Err(ApiError::recipe_not_found());
    };

    match state.recipe_service.get_recipe(user.id, recipe_id).await {
        Ok(Some(recipe)) => Ok(Json(RecipeDetailResponse::from(recipe))),
        Ok(None) => Err(ApiError::recipe_not_found()),
        Err(e) => Err(handle_service_error(e, &state.env, "get_recipe_by_id")),
    }
}
