use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::json;

use appointment_cell::router::appointment_routes;
use client_cell::router::client_routes;
use provider_cell::router::provider_routes;
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route(
            "/",
            get(|| async { Json(json!({ "msg": "Thank you for using the Reservation System!" })) }),
        )
        .nest("/providers", provider_routes(state.clone()))
        .nest("/clients", client_routes(state.clone()))
        .nest("/appointments", appointment_routes(state))
}
