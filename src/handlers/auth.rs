use axum::{extract::State, Extension, Json};
use serde::Serialize;

use crate::error::AppResult;
use crate::models::User;
use crate::rental::auth::{coerce_user, LoginData};
use crate::utils::jwt::{create_token, Claims};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Sign in with whatever user data is supplied; no credentials are checked
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginData>,
) -> AppResult<Json<AuthResponse>> {
    let user = coerce_user(payload);

    let token = create_token(
        &user,
        &state.config.jwt_secret,
        state.config.jwt_expiration_hours,
    )?;

    tracing::info!(user_id = %user.id, "Issued session token");

    Ok(Json(AuthResponse { token, user }))
}

/// The user behind the bearer token
pub async fn me(Extension(claims): Extension<Claims>) -> Json<User> {
    Json(claims.user())
}
