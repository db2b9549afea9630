use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

use crate::auth::token::verify_token;
use crate::errors::AppError;
use crate::state::AppState;

/// The caller, authenticated from an `Authorization: Bearer <jwt>` header.
/// Adding it to a handler's arguments makes the route protected.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Uuid,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                AppError::Unauthorized("User not authenticated. Please login again.".to_string())
            })?;

        let user_id = verify_token(token, &state.config.jwt_secret)?;
        Ok(AuthUser { user_id })
    }
}
