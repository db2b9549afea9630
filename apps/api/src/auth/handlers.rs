use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::store::{create_user, find_by_email};
use crate::auth::token::issue_token;
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::models::user::UserSummary;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: &'static str,
    pub user: UserSummary,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
    pub user: UserSummary,
}

/// POST /api/auth/signup
pub async fn handle_signup(
    State(state): State<AppState>,
    AppJson(req): AppJson<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    let name = req.name.trim();
    let email = req.email.trim();
    if name.is_empty() || email.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "name, email and password are required".to_string(),
        ));
    }

    if find_by_email(&state.db, email).await?.is_some() {
        return Err(AppError::Conflict("User already exists".to_string()));
    }

    let password_hash = hash_password(req.password).await?;
    // A concurrent signup can still win the race; the unique index decides.
    let user = create_user(&state.db, name, email, &password_hash)
        .await?
        .ok_or_else(|| AppError::Conflict("User already exists".to_string()))?;

    info!("Created user {}", user.id);

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "Signup successful",
            user: UserSummary::from(&user),
        }),
    ))
}

/// POST /api/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let invalid = || AppError::Unauthorized("Invalid credentials".to_string());

    let user = find_by_email(&state.db, req.email.trim())
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(req.password, user.password_hash.clone()).await? {
        return Err(invalid());
    }

    let token = issue_token(user.id, &state.config.jwt_secret)?;
    info!("User {} logged in", user.id);

    Ok(Json(LoginResponse {
        message: "Login successful",
        token,
        user: UserSummary::from(&user),
    }))
}
