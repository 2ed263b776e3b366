use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub client_id: Uuid,
    pub provider_id: Uuid,
    pub appointment_time: DateTime<Utc>,
    pub confirmed: bool,
    pub created_on: DateTime<Utc>,
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReserveAppointmentRequest {
    pub client_id: Uuid,
    pub provider_id: Uuid,
    pub appointment_time: DateTime<Utc>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Client not found")]
    ClientNotFound,

    #[error("Provider not found")]
    ProviderNotFound,

    #[error("Reservations require at least {lead_time_hours} hours notice")]
    TooSoon { lead_time_hours: i64 },

    #[error("Appointment slot not available")]
    SlotNotAvailable,

    #[error("Appointment slot already taken")]
    SlotTaken,

    #[error("Confirmation window of {deadline_minutes} minutes has expired")]
    ConfirmationExpired { deadline_minutes: i64 },

    #[error("Database error: {0}")]
    DatabaseError(String),
}
