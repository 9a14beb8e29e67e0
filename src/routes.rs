//! HTTP router assembly.

use crate::{handlers, middleware, state::AppState};
use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the application router.
///
/// - `GET /` is public
/// - `POST /scan` and `GET /history` require the bearer token when one is configured
pub fn build_router(state: AppState) -> Router {
    let authenticated_routes = Router::new()
        .route("/scan", post(handlers::scan::scan_email))
        .route("/history", get(handlers::history::get_history))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::auth_middleware,
        ));

    Router::new()
        .route("/", get(handlers::health::health_check))
        .merge(authenticated_routes)
        .layer(TraceLayer::new_for_http())
        // Answers CORS preflight before authentication runs
        .layer(CorsLayer::permissive())
        .with_state(state)
}
