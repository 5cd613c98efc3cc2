use axum::{extract::State, http::StatusCode, Json};
use recipe_lib::repository::traits::{
    IngredientRepositoryTrait, RecipeRepositoryTrait, TagRepositoryTrait, UserRepositoryTrait,
};
use validator::Validate;

use crate::auth::AuthUser;
use crate::error::{handle_service_error, ApiError};
use crate::extract::JsonOrForm;
use crate::methods::entities::{CreateIngredientRequest, IngredientResponse};
use crate::methods::routes::INGREDIENTS_PATH;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = INGREDIENTS_PATH,
    tag = "ingredients",
    request_body(content(
        (CreateIngredientRequest = "application/json"),
        (CreateIngredientRequest = "application/x-www-form-urlencoded")
    )),
    security(("token" = [])),
    responses(
        (status = 201, description = "Ingredient created for the caller", body = IngredientResponse),
        (status = 400, description = "Missing or empty name"),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn create_ingredient<U, I, T, R>(
    State(state): State<AppState<U, I, T, R>>,
    AuthUser(user): AuthUser,
    JsonOrForm(payload): JsonOrForm<CreateIngredientRequest>,
) -> Result<(StatusCode, Json<IngredientResponse>), ApiError>
where
    U: UserRepositoryTrait + 'static,
    I: IngredientRepositoryTrait + 'static,
    T: TagRepositoryTrait + 'static,
    R: RecipeRepositoryTrait + 'static,
{
    payload.validate()?;

    let ingredient = state
        .recipe_service
        .create_ingredient(user.id, &payload.name)
        .await
        .map_err(|e| handle_service_error(e, &state.env, "create_ingredient"))?;

    tracing::info!(user_id = user.id, ingredient_id = ingredient.id, "ingredient created");
    Ok((StatusCode::CREATED, Json(IngredientResponse::from(ingredient))))
}
