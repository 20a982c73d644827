use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route(
            "/calculate",
            get(handlers::calculator).post(handlers::submit),
        )
        .route("/api/calculate", post(handlers::calculate_api))
        .route("/api/state", get(handlers::get_state))
        .route("/api/tiers", get(handlers::get_tiers))
        .with_state(state)
}
