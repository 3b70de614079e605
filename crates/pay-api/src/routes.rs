//! # Routes
//!
//! Axum router configuration for the checkout API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET    /health
/// - GET    /api/v1/payment-types
/// - POST   /api/v1/checkout
/// - GET    /api/v1/payments/{payment_id}
/// - POST   /api/v1/payments/{payment_id}/capture
/// - DELETE /api/v1/payment-methods/{method_id}
pub fn create_router(state: AppState) -> Router {
    // The checkout widget is served from the storefront's origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/payment-types", get(handlers::payment_types))
        .route("/checkout", post(handlers::create_checkout))
        .route("/payments/{payment_id}", get(handlers::get_payment))
        .route(
            "/payments/{payment_id}/capture",
            post(handlers::capture_payment),
        )
        .route(
            "/payment-methods/{method_id}",
            delete(handlers::delete_payment_method),
        );

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .nest("/api/v1", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
