use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==============================================================================
// CORE PROVIDER MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Half-open booking window `[start_time, end_time)` owned by one provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Availability {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Confirmed appointment as seen by the availability resolver. Only the
/// instant matters here; the full record lives in appointment-cell.
#[derive(Debug, Clone, Deserialize)]
pub struct BookedSlot {
    pub appointment_time: DateTime<Utc>,
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProviderRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAvailabilityRequest {
    pub available_from: DateTime<Utc>,
    pub available_to: DateTime<Utc>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Provider not found")]
    NotFound,

    #[error("Invalid availability window: {0}")]
    InvalidWindow(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
