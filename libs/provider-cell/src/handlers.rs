use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{CreateAvailabilityRequest, CreateProviderRequest, ProviderError};
use crate::services::{availability::AvailabilityService, provider::ProviderService};

fn map_provider_error(e: ProviderError) -> AppError {
    match e {
        ProviderError::NotFound => AppError::NotFound("Provider not found".to_string()),
        ProviderError::InvalidWindow(msg) => AppError::BadRequest(msg),
        ProviderError::DatabaseError(msg) => AppError::Internal(msg),
    }
}

#[axum::debug_handler]
pub async fn list_providers(
    State(config): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let service = ProviderService::new(&config);

    let providers = service.list_providers().await.map_err(map_provider_error)?;

    Ok(Json(json!({
        "providers": providers,
        "total": providers.len()
    })))
}

#[axum::debug_handler]
pub async fn create_provider(
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<CreateProviderRequest>,
) -> Result<Json<Value>, AppError> {
    let service = ProviderService::new(&config);

    let provider = service
        .create_provider(request)
        .await
        .map_err(map_provider_error)?;

    Ok(Json(json!(provider)))
}

#[axum::debug_handler]
pub async fn get_provider(
    State(config): State<Arc<AppConfig>>,
    Path(provider_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = ProviderService::new(&config);

    let provider = service
        .get_provider(provider_id)
        .await
        .map_err(map_provider_error)?;

    Ok(Json(json!(provider)))
}

#[axum::debug_handler]
pub async fn create_availability(
    State(config): State<Arc<AppConfig>>,
    Path(provider_id): Path<Uuid>,
    Json(request): Json<CreateAvailabilityRequest>,
) -> Result<Json<Value>, AppError> {
    // Provider must exist before a window can hang off it
    let provider_service = ProviderService::new(&config);
    provider_service
        .get_provider(provider_id)
        .await
        .map_err(map_provider_error)?;

    let service = AvailabilityService::new(&config);

    service
        .add_window(provider_id, request)
        .await
        .map_err(map_provider_error)?;

    // Match the reservation API contract: return the full current window list
    let windows = service
        .get_windows(provider_id)
        .await
        .map_err(map_provider_error)?;

    Ok(Json(json!({
        "provider_id": provider_id,
        "availability": windows,
        "total": windows.len()
    })))
}

#[axum::debug_handler]
pub async fn get_availability(
    State(config): State<Arc<AppConfig>>,
    Path(provider_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = AvailabilityService::new(&config);

    let windows = service
        .get_windows(provider_id)
        .await
        .map_err(map_provider_error)?;

    Ok(Json(json!({
        "provider_id": provider_id,
        "availability": windows,
        "total": windows.len()
    })))
}

#[axum::debug_handler]
pub async fn get_available_slots(
    State(config): State<Arc<AppConfig>>,
    Path(provider_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = AvailabilityService::new(&config);

    let slots = service
        .bookable_slots(provider_id)
        .await
        .map_err(map_provider_error)?;

    Ok(Json(json!({
        "provider_id": provider_id,
        "available_slots": slots,
        "total_slots": slots.len()
    })))
}
