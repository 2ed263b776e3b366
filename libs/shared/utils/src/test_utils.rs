use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use shared_config::AppConfig;

use crate::clock::Clock;

pub struct TestConfig {
    pub store_url: String,
    pub store_anon_key: String,
    pub slot_length_minutes: i64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            store_url: "http://localhost:54321".to_string(),
            store_anon_key: "test-anon-key".to_string(),
            slot_length_minutes: 15,
        }
    }
}

impl TestConfig {
    pub fn with_store_url(url: &str) -> Self {
        Self {
            store_url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            store_url: self.store_url.clone(),
            store_anon_key: self.store_anon_key.clone(),
            store_service_key: String::new(),
            slot_length_minutes: self.slot_length_minutes,
            lead_time_hours: 24,
            confirmation_deadline_minutes: 30,
            port: 3000,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Canned store rows shared across cell tests.
pub struct MockStoreResponses;

impl MockStoreResponses {
    pub fn provider_row(id: &str, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "created_at": Utc::now().to_rfc3339()
        })
    }

    pub fn client_row(id: &str, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "created_at": Utc::now().to_rfc3339()
        })
    }

    pub fn availability_row(
        id: &str,
        provider_id: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Value {
        json!({
            "id": id,
            "provider_id": provider_id,
            "start_time": start_time.to_rfc3339(),
            "end_time": end_time.to_rfc3339()
        })
    }

    pub fn appointment_row(
        id: &str,
        client_id: &str,
        provider_id: &str,
        appointment_time: DateTime<Utc>,
        confirmed: bool,
        created_on: DateTime<Utc>,
    ) -> Value {
        json!({
            "id": id,
            "client_id": client_id,
            "provider_id": provider_id,
            "appointment_time": appointment_time.to_rfc3339(),
            "confirmed": confirmed,
            "created_on": created_on.to_rfc3339()
        })
    }
}
