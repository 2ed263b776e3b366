use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn client_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(handlers::list_clients))
        .route("/", post(handlers::create_client))
        .route("/{client_id}", get(handlers::get_client))
        .with_state(state)
}
