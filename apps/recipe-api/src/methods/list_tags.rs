use axum::{
    extract::{Query, State},
    Json,
};
use recipe_lib::repository::traits::{
    IngredientRepositoryTrait, RecipeRepositoryTrait, TagRepositoryTrait, UserRepositoryTrait,
};

use crate::auth::AuthUser;
use crate::error::{handle_service_error, ApiError};
use crate::methods::entities::{AssignedQuery, TagResponse};
use crate::methods::routes::TAGS_PATH;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = TAGS_PATH,
    tag = "tags",
    params(AssignedQuery),
    security(("token" = [])),
    responses(
        (status = 200, description = "Tags owned by the caller", body = Vec<TagResponse>),
        (status = 400, description = "Invalid assigned_only value"),
        (status = 401, description = "Missing or invalid token"),
    )
)]
pub async fn list_tags<U, I, T, R>(
    State(state): State<AppState<U, I, T, R>>,
    AuthUser(user): AuthUser,
    Query(query): Query<AssignedQuery>,
) -> Result<Json<Vec<TagResponse>>, ApiError>
where
    U: UserRepositoryTrait + 'static,
    I: IngredientRepositoryTrait + 'static,
    T: TagRepositoryTrait + 'static,
    R: RecipeRepositoryTrait + 'static,
{
    let tags = state
        .recipe_service
        .list_tags(user.id, query.filter()?)
        .await
        .map_err(|e| handle_service_error(e, &state.env, "list_tags"))?;

    Ok(Json(tags.into_iter().map(TagResponse::from).collect()))
}
