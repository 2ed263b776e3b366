use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::StoreClient;

use crate::models::{Availability, BookedSlot, CreateAvailabilityRequest, ProviderError};
use crate::services::slots::SlotSequence;

pub struct AvailabilityService {
    store: StoreClient,
    slot_length_minutes: i64,
}

impl AvailabilityService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
            slot_length_minutes: config.slot_length_minutes,
        }
    }

    /// Create an availability window for a provider.
    pub async fn add_window(
        &self,
        provider_id: Uuid,
        request: CreateAvailabilityRequest,
    ) -> Result<Availability, ProviderError> {
        debug!("Creating availability window for provider: {}", provider_id);

        if request.available_from >= request.available_to {
            return Err(ProviderError::InvalidWindow(
                "Window start must be before window end".to_string(),
            ));
        }

        let window_data = json!({
            "provider_id": provider_id,
            "start_time": request.available_from.to_rfc3339(),
            "end_time": request.available_to.to_rfc3339()
        });

        let result = self
            .store
            .insert_returning("/rest/v1/availabilities", window_data)
            .await
            .map_err(|e| ProviderError::DatabaseError(e.to_string()))?;

        let row = result
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::DatabaseError("Failed to create availability".to_string()))?;

        let window: Availability = serde_json::from_value(row)
            .map_err(|e| ProviderError::DatabaseError(e.to_string()))?;
        debug!("Availability window created with ID: {}", window.id);

        Ok(window)
    }

    /// Get a provider's raw availability windows, earliest first.
    pub async fn get_windows(&self, provider_id: Uuid) -> Result<Vec<Availability>, ProviderError> {
        debug!("Fetching availability windows for provider: {}", provider_id);

        let path = format!(
            "/rest/v1/availabilities?provider_id=eq.{}&order=start_time.asc",
            provider_id
        );
        let result = self
            .store
            .select(&path)
            .await
            .map_err(|e| ProviderError::DatabaseError(e.to_string()))?;

        let windows: Vec<Availability> = result
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<Availability>, _>>()
            .map_err(|e| ProviderError::DatabaseError(e.to_string()))?;

        Ok(windows)
    }

    /// Resolve the provider's bookable instants: candidate slots from every
    /// window, minus slots that exactly match a confirmed appointment time.
    ///
    /// Output is ordered window by window. Overlapping windows can yield the
    /// same instant more than once; no dedup is applied.
    pub async fn bookable_slots(&self, provider_id: Uuid) -> Result<Vec<DateTime<Utc>>, ProviderError> {
        debug!("Resolving bookable slots for provider: {}", provider_id);

        let booked = self.get_confirmed_times(provider_id).await?;
        let windows = self.get_windows(provider_id).await?;

        let mut slots = Vec::new();
        for window in &windows {
            let candidates =
                SlotSequence::new(window.start_time, window.end_time, self.slot_length_minutes);
            slots.extend(candidates.iter().filter(|slot| !booked.contains(slot)));
        }

        debug!("Found {} bookable slots", slots.len());
        Ok(slots)
    }

    async fn get_confirmed_times(
        &self,
        provider_id: Uuid,
    ) -> Result<HashSet<DateTime<Utc>>, ProviderError> {
        let path = format!(
            "/rest/v1/appointments?provider_id=eq.{}&confirmed=eq.true&select=appointment_time",
            provider_id
        );
        let result: Vec<Value> = self
            .store
            .select(&path)
            .await
            .map_err(|e| ProviderError::DatabaseError(e.to_string()))?;

        let booked: Vec<BookedSlot> = result
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<BookedSlot>, _>>()
            .map_err(|e| ProviderError::DatabaseError(e.to_string()))?;

        Ok(booked.into_iter().map(|b| b.appointment_time).collect())
    }
}
