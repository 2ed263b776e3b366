use std::sync::Arc;

use chrono::Duration as ChronoDuration;
use serde_json::json;
use tracing::{debug, info, warn};
use uuid::Uuid;

use client_cell::services::ClientService;
use provider_cell::services::availability::AvailabilityService;
use provider_cell::services::provider::ProviderService;
use shared_config::AppConfig;
use shared_database::StoreClient;
use shared_utils::{Clock, SystemClock};

use crate::models::{Appointment, AppointmentError, ReserveAppointmentRequest};

pub struct ReservationService {
    store: StoreClient,
    availability_service: AvailabilityService,
    provider_service: ProviderService,
    client_service: ClientService,
    clock: Arc<dyn Clock>,
    lead_time_hours: i64,
    confirmation_deadline_minutes: i64,
}

impl ReservationService {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &AppConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: StoreClient::new(config),
            availability_service: AvailabilityService::new(config),
            provider_service: ProviderService::new(config),
            client_service: ClientService::new(config),
            clock,
            lead_time_hours: config.lead_time_hours,
            confirmation_deadline_minutes: config.confirmation_deadline_minutes,
        }
    }

    /// Reserve an appointment slot for a client with a provider.
    ///
    /// No uniqueness constraint or locking guards the slot between the
    /// availability check and the insert: two concurrent reservations for the
    /// same instant can both pass the check and both persist.
    pub async fn reserve(
        &self,
        request: ReserveAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        info!(
            "Reserving appointment for client {} with provider {} at {}",
            request.client_id, request.provider_id, request.appointment_time
        );

        // Step 1: Both parties must exist
        self.client_service
            .get_client(request.client_id)
            .await
            .map_err(|e| match e {
                client_cell::models::ClientError::NotFound => AppointmentError::ClientNotFound,
                other => AppointmentError::DatabaseError(other.to_string()),
            })?;

        self.provider_service
            .get_provider(request.provider_id)
            .await
            .map_err(|e| match e {
                provider_cell::models::ProviderError::NotFound => {
                    AppointmentError::ProviderNotFound
                }
                other => AppointmentError::DatabaseError(other.to_string()),
            })?;

        // Step 2: Lead time
        let now = self.clock.now();
        if request.appointment_time < now + ChronoDuration::hours(self.lead_time_hours) {
            warn!(
                "Reservation rejected: {} is under the {}h lead time",
                request.appointment_time, self.lead_time_hours
            );
            return Err(AppointmentError::TooSoon {
                lead_time_hours: self.lead_time_hours,
            });
        }

        // Step 3: Requested instant must be in the bookable set
        let bookable = self
            .availability_service
            .bookable_slots(request.provider_id)
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        if !bookable.contains(&request.appointment_time) {
            return Err(AppointmentError::SlotNotAvailable);
        }

        // Step 4: Persist unconfirmed
        let appointment_data = json!({
            "client_id": request.client_id,
            "provider_id": request.provider_id,
            "appointment_time": request.appointment_time.to_rfc3339(),
            "confirmed": false,
            "created_on": now.to_rfc3339()
        });

        let result = self
            .store
            .insert_returning("/rest/v1/appointments", appointment_data)
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        let row = result.into_iter().next().ok_or_else(|| {
            AppointmentError::DatabaseError("Failed to create appointment".to_string())
        })?;

        let appointment: Appointment = serde_json::from_value(row)
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        info!("Appointment {} reserved, awaiting confirmation", appointment.id);
        Ok(appointment)
    }

    /// Confirm a reserved appointment.
    ///
    /// Re-confirming an already-confirmed appointment is a no-op and returns
    /// the record unchanged.
    pub async fn confirm(&self, appointment_id: Uuid) -> Result<Appointment, AppointmentError> {
        debug!("Confirming appointment: {}", appointment_id);

        let appointment = self.get_appointment(appointment_id).await?;

        if appointment.confirmed {
            return Ok(appointment);
        }

        // The bookable set only excludes confirmed appointments, so this
        // appointment's own unconfirmed reservation does not hide its slot.
        // An absent slot means a rival reservation was confirmed meanwhile.
        let bookable = self
            .availability_service
            .bookable_slots(appointment.provider_id)
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        if !bookable.contains(&appointment.appointment_time) {
            warn!(
                "Appointment {} slot {} was claimed by another confirmed booking",
                appointment.id, appointment.appointment_time
            );
            return Err(AppointmentError::SlotTaken);
        }

        let now = self.clock.now();
        let deadline =
            appointment.created_on + ChronoDuration::minutes(self.confirmation_deadline_minutes);
        if now > deadline {
            warn!(
                "Appointment {} confirmation window expired at {}",
                appointment.id, deadline
            );
            return Err(AppointmentError::ConfirmationExpired {
                deadline_minutes: self.confirmation_deadline_minutes,
            });
        }

        let path = format!("/rest/v1/appointments?id=eq.{}", appointment_id);
        let result = self
            .store
            .update_returning(&path, json!({ "confirmed": true }))
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        let row = result.into_iter().next().ok_or_else(|| {
            AppointmentError::DatabaseError("Failed to confirm appointment".to_string())
        })?;

        let confirmed: Appointment = serde_json::from_value(row)
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        info!("Appointment {} confirmed", confirmed.id);
        Ok(confirmed)
    }

    pub async fn get_appointment(
        &self,
        appointment_id: Uuid,
    ) -> Result<Appointment, AppointmentError> {
        debug!("Fetching appointment: {}", appointment_id);

        let path = format!("/rest/v1/appointments?id=eq.{}", appointment_id);
        let result = self
            .store
            .select(&path)
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        let row = result.into_iter().next().ok_or(AppointmentError::NotFound)?;

        serde_json::from_value(row).map_err(|e| AppointmentError::DatabaseError(e.to_string()))
    }

    pub async fn confirmed_for_provider(
        &self,
        provider_id: Uuid,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let path = format!(
            "/rest/v1/appointments?provider_id=eq.{}&confirmed=eq.true&order=appointment_time.asc",
            provider_id
        );
        self.fetch_appointments(&path).await
    }

    pub async fn confirmed_for_client(
        &self,
        client_id: Uuid,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let path = format!(
            "/rest/v1/appointments?client_id=eq.{}&confirmed=eq.true&order=appointment_time.asc",
            client_id
        );
        self.fetch_appointments(&path).await
    }

    async fn fetch_appointments(&self, path: &str) -> Result<Vec<Appointment>, AppointmentError> {
        let result = self
            .store
            .select(path)
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        result
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<Appointment>, _>>()
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))
    }
}
