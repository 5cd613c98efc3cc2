use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use recipe_lib::entities::User;
use recipe_lib::repository::traits::{
    IngredientRepositoryTrait, RecipeRepositoryTrait, TagRepositoryTrait, UserRepositoryTrait,
};

use crate::error::{handle_service_error, ApiError};
use crate::state::AppState;

const AUTH_SCHEMES: [&str; 2] = ["Token ", "Bearer "];

/// The authenticated caller. Handlers that take this extractor reject
/// anonymous requests with 401 before touching any data.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

/// Token from `Authorization: Token <key>` (or `Bearer <key>`).
pub fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    AUTH_SCHEMES
        .iter()
        .find_map(|scheme| value.strip_prefix(scheme))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl<U, I, T, R> FromRequestParts<AppState<U, I, T, R>> for AuthUser
where
    U: UserRepositoryTrait + 'static,
    I: IngredientRepositoryTrait + 'static,
    T: TagRepositoryTrait + 'static,
    R: RecipeRepositoryTrait + 'static,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<U, I, T, R>,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = token_from_headers(&parts.headers) else {
            tracing::debug!(uri = %parts.uri, "request without credentials");
            return Err(ApiError::unauthorized());
        };

        match state.recipe_service.authenticate(token).await {
            Ok(Some(user)) => Ok(AuthUser(user)),
            Ok(None) => {
                tracing::warn!(uri = %parts.uri, "request with unknown token");
                Err(ApiError::unauthorized())
            }
            Err(e) => Err(handle_service_error(e, &state.env, "authenticate")),
        }
    }
}
