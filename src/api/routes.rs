//! API Routes
//!
//! Configures the Axum router with all advisor service endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_advisor, delete_advisor, get_advisor, health_handler, list_advisors, stats_handler,
    update_advisor, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/advisors` - List advisors
/// - `POST /api/advisors` - Create an advisor
/// - `GET /api/advisors/:id` - Fetch an advisor, cache first
/// - `PUT /api/advisors/:id` - Replace an advisor
/// - `DELETE /api/advisors/:id` - Delete an advisor
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/advisors", get(list_advisors).post(create_advisor))
        .route(
            "/api/advisors/:id",
            get(get_advisor).put(update_advisor).delete(delete_advisor),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
