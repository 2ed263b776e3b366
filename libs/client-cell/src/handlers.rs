use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{ClientError, CreateClientRequest};
use crate::services::ClientService;

fn map_client_error(e: ClientError) -> AppError {
    match e {
        ClientError::NotFound => AppError::NotFound("Client not found".to_string()),
        ClientError::DatabaseError(msg) => AppError::Internal(msg),
    }
}

#[axum::debug_handler]
pub async fn list_clients(State(config): State<Arc<AppConfig>>) -> Result<Json<Value>, AppError> {
    let service = ClientService::new(&config);

    let clients = service.list_clients().await.map_err(map_client_error)?;

    Ok(Json(json!({
        "clients": clients,
        "total": clients.len()
    })))
}

#[axum::debug_handler]
pub async fn create_client(
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<CreateClientRequest>,
) -> Result<Json<Value>, AppError> {
    let service = ClientService::new(&config);

    let client = service.create_client(request).await.map_err(map_client_error)?;

    Ok(Json(json!(client)))
}

#[axum::debug_handler]
pub async fn get_client(
    State(config): State<Arc<AppConfig>>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = ClientService::new(&config);

    let client = service.get_client(client_id).await.map_err(map_client_error)?;

    Ok(Json(json!(client)))
}
