use axum::{
    Extension,
    extract::{
        Json, Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};

use crate::{
    AppState,
    database::Booking,
    error::AppResult,
    infrastructure::AuthUser,
};

use super::model::{CreateBookingRequest, UpdateBookingRequest};

#[axum::debug_handler]
pub async fn list_bookings(State(state): State<AppState>) -> AppResult<Json<Vec<Booking>>> {
    let bookings = state.bookings.list().await?;
    Ok(Json(bookings))
}

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    let Json(req) = payload?;
    let booking = state.bookings.create(req.into()).await?;
    tracing::info!("User {} created booking {}", user.user_id, booking.id);
    Ok((StatusCode::CREATED, Json(booking)))
}

#[axum::debug_handler]
pub async fn get_booking(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<Booking>> {
    let Path(id) = id?;
    Ok(Json(state.bookings.get(id).await?))
}

#[axum::debug_handler]
pub async fn update_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateBookingRequest>, JsonRejection>,
) -> AppResult<Json<Booking>> {
    let Path(id) = id?;
    let Json(req) = payload?;
    let booking = state.bookings.update(id, req.into()).await?;
    tracing::info!("User {} updated booking {}", user.user_id, booking.id);
    Ok(Json(booking))
}

#[axum::debug_handler]
pub async fn delete_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = id?;
    state.bookings.delete(id).await?;
    tracing::info!("User {} deleted booking {}", user.user_id, id);
    Ok(StatusCode::NO_CONTENT)
}
