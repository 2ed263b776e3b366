use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{AppointmentError, ReserveAppointmentRequest};
use crate::services::ReservationService;

fn map_appointment_error(e: AppointmentError) -> AppError {
    match e {
        AppointmentError::NotFound => AppError::NotFound("Appointment not found".to_string()),
        AppointmentError::ClientNotFound => AppError::NotFound("Client not found".to_string()),
        AppointmentError::ProviderNotFound => AppError::NotFound("Provider not found".to_string()),
        AppointmentError::TooSoon { .. } => AppError::BadRequest(e.to_string()),
        AppointmentError::ConfirmationExpired { .. } => AppError::BadRequest(e.to_string()),
        AppointmentError::SlotNotAvailable => AppError::Conflict(e.to_string()),
        AppointmentError::SlotTaken => AppError::Conflict(e.to_string()),
        AppointmentError::DatabaseError(msg) => AppError::Internal(msg),
    }
}

#[axum::debug_handler]
pub async fn reserve_appointment(
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<ReserveAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = ReservationService::new(&config);

    let appointment = service
        .reserve(request)
        .await
        .map_err(map_appointment_error)?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(config): State<Arc<AppConfig>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = ReservationService::new(&config);

    let appointment = service
        .get_appointment(appointment_id)
        .await
        .map_err(map_appointment_error)?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn confirm_appointment(
    State(config): State<Arc<AppConfig>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = ReservationService::new(&config);

    let appointment = service
        .confirm(appointment_id)
        .await
        .map_err(map_appointment_error)?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn get_provider_appointments(
    State(config): State<Arc<AppConfig>>,
    Path(provider_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = ReservationService::new(&config);

    let appointments = service
        .confirmed_for_provider(provider_id)
        .await
        .map_err(map_appointment_error)?;

    Ok(Json(json!({
        "appointments": appointments,
        "total": appointments.len()
    })))
}

#[axum::debug_handler]
pub async fn get_client_appointments(
    State(config): State<Arc<AppConfig>>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = ReservationService::new(&config);

    let appointments = service
        .confirmed_for_client(client_id)
        .await
        .map_err(map_appointment_error)?;

    Ok(Json(json!({
        "appointments": appointments,
        "total": appointments.len()
    })))
}
