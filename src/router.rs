use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;

use crate::{
    AppState,
    middleware::{auth_middleware, log_requests},
    routes::{self, booking, user},
};

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/hello", get(routes::hello))
        .route("/users/register", post(user::register))
        .route("/users/login", post(user::login));

    let protected_routes = Router::new()
        .route("/users/me", get(user::me))
        .route(
            "/bookings",
            get(booking::list_bookings).post(booking::create_booking),
        )
        .route(
            "/bookings/{id}",
            get(booking::get_booking)
                .put(booking::update_booking)
                .delete(booking::delete_booking),
        )
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    let router = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(from_fn(log_requests))
                .layer(TimeoutLayer::new(state.config.request_timeout())),
        );

    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding permissive CORS layer for development");
        router.layer(tower_http::cors::CorsLayer::permissive())
    };

    router.with_state(state)
}
