use axum::{
    extract::{Query, State},
    Json,
};
use recipe_lib::repository::traits::{
    IngredientRepositoryTrait, RecipeRepositoryTrait, TagRepositoryTrait, UserRepositoryTrait,
};

use crate::auth::AuthUser;
use crate::error::{handle_service_error, ApiError};
use crate::methods::entities::{AssignedQuery, IngredientResponse};
use crate::methods::routes::INGREDIENTS_PATH;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = INGREDIENTS_PATH,
    tag = "ingredients",
    params(AssignedQuery),
    security(("token" = [])),
    responses(
        (status = 200, description = "Ingredients owned by the caller, name descending", body = Vec<IngredientResponse>),
        (status = 400, description = "Invalid assigned_only value"),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn list_ingredients<U, I, T, R>(
    State(state): State<AppState<U, I, T, R>>,
    AuthUser(user): AuthUser,
    Query(query): Query<AssignedQuery>,
) -> Result<Json<Vec<IngredientResponse>>, ApiError>
where
    U: UserRepositoryTrait + 'static,
    I: IngredientRepositoryTrait + 'static,
    T: TagRepositoryTrait + 'static,
    R: RecipeRepositoryTrait + 'static,
{
    let filter = query.filter()?;

    state
        .recipe_service
        .list_ingredients(user.id, filter)
        .await
        .map(|ingredients| Json(ingredients.into_iter().map(IngredientResponse::from).collect()))
        .map_err(|e| handle_service_error(e, &state.env, "list_ingredients"))
}
