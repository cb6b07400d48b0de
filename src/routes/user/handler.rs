use axum::{
    Extension,
    extract::{Json, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    AppState,
    database::User,
    error::AppResult,
    infrastructure::AuthUser,
};

use super::model::{CredentialsRequest, LoginResponse};

#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<User>)> {
    let Json(req) = payload?;
    let user = state.auth.register(&req.username, &req.password).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let Json(req) = payload?;
    let token = state.auth.login(&req.username, &req.password).await?;
    Ok(Json(LoginResponse { token }))
}

/// The account behind the bearer token.
#[axum::debug_handler]
pub async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> AppResult<Json<User>> {
    Ok(Json(state.auth.current_user(user).await?))
}
