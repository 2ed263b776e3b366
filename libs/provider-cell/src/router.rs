use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn provider_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(handlers::list_providers))
        .route("/", post(handlers::create_provider))
        .route("/{provider_id}", get(handlers::get_provider))
        .route("/{provider_id}/availability", get(handlers::get_availability))
        .route("/{provider_id}/availability", post(handlers::create_availability))
        .route("/{provider_id}/available-slots", get(handlers::get_available_slots))
        .with_state(state)
}
