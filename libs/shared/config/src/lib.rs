use std::env;
use tracing::warn;

pub const DEFAULT_SLOT_LENGTH_MINUTES: i64 = 15;
pub const DEFAULT_LEAD_TIME_HOURS: i64 = 24;
pub const DEFAULT_CONFIRMATION_DEADLINE_MINUTES: i64 = 30;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store_url: String,
    pub store_anon_key: String,
    pub store_service_key: String,
    pub slot_length_minutes: i64,
    pub lead_time_hours: i64,
    pub confirmation_deadline_minutes: i64,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            store_url: env::var("STORE_URL")
                .unwrap_or_else(|_| {
                    warn!("STORE_URL not set, using empty value");
                    String::new()
                }),
            store_anon_key: env::var("STORE_ANON_KEY")
                .unwrap_or_else(|_| {
                    warn!("STORE_ANON_KEY not set, using empty value");
                    String::new()
                }),
            store_service_key: env::var("STORE_SERVICE_KEY")
                .unwrap_or_else(|_| {
                    warn!("STORE_SERVICE_KEY not set, using empty value");
                    String::new()
                }),
            slot_length_minutes: parse_env_i64("SLOT_LENGTH_MINUTES", DEFAULT_SLOT_LENGTH_MINUTES),
            lead_time_hours: parse_env_i64("RESERVATION_LEAD_TIME_HOURS", DEFAULT_LEAD_TIME_HOURS),
            confirmation_deadline_minutes: parse_env_i64(
                "CONFIRMATION_DEADLINE_MINUTES",
                DEFAULT_CONFIRMATION_DEADLINE_MINUTES,
            ),
            port: parse_env_u16("PORT", 3000),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.store_url.is_empty() && !self.store_anon_key.is_empty()
    }
}

fn parse_env_i64(name: &str, default: i64) -> i64 {
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("{} is not a valid number ({}), using default {}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}

fn parse_env_u16(name: &str, default: u16) -> u16 {
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("{} is not a valid port ({}), using default {}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}
