use axum::{extract::State, http::StatusCode, Json};
use recipe_lib::repository::traits::{
    IngredientRepositoryTrait, RecipeRepositoryTrait, TagRepositoryTrait, UserRepositoryTrait,
};
use validator::Validate;

use crate::auth::AuthUser;
use crate::error::{handle_service_error, ApiError};
use crate::extract::JsonOrForm;
use crate::methods::entities::{CreateTagRequest, TagResponse};
use crate::methods::routes::TAGS_PATH;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = TAGS_PATH,
    tag = "tags",
    request_body(content(
        (CreateTagRequest = "application/json"),
        (CreateTagRequest = "application/x-www-form-urlencoded")
    )),
    security(("token" = [])),
    responses(
        (status = 201, description = "Tag created", body = TagResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid token"),
    )
)]
pub async fn create_tag<U, I, T, R>(
    State(state): State<AppState<U, I, T, R>>,
    AuthUser(user): AuthUser,
    JsonOrForm(payload): JsonOrForm<CreateTagRequest>,
) -> Result<(StatusCode, Json<TagResponse>), ApiError>
where
    U: UserRepositoryTrait + 'static,
    I: IngredientRepositoryTrait + 'static,
    T: TagRepositoryTrait + 'static,
    R: RecipeRepositoryTrait + 'static,
{
    payload.validate()?;

    state
        .recipe_service
        .create_tag(user.id, &payload.name)
        .await
        .map(|tag| (StatusCode::CREATED, Json(TagResponse::from(tag))))
        .map_err(|e| handle_service_error(e, &state.env, "create_tag"))
}
