use axum::{
    body::Body,
    extract::State,
    http::{Request, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

use crate::{AppState, error::AppError};

/// Admits a request only with a valid `Authorization: Bearer <token>` header.
/// On success the `AuthUser` is stored in the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or(AppError::Unauthorized("missing authorization header"))?
        .to_str()
        .map_err(|_| AppError::Unauthorized("invalid authorization header"))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AppError::Unauthorized("invalid authorization header"))?
        .trim();

    let user = state.auth.authenticate(token)?;
    tracing::debug!("Request authenticated for user {}", user.user_id);

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
