use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use appointment_cell::models::AppointmentError;
use appointment_cell::services::ReservationService;
use shared_utils::test_utils::{FixedClock, MockStoreResponses, TestConfig};

fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap()
}

fn service_for(mock_server: &MockServer) -> ReservationService {
    let config = TestConfig::with_store_url(&mock_server.uri()).to_app_config();
    ReservationService::with_clock(&config, Arc::new(FixedClock(test_now())))
}

async fn mock_appointment_lookup(
    mock_server: &MockServer,
    appointment_id: Uuid,
    rows: serde_json::Value,
) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("id", format!("eq.{}", appointment_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows))
        .mount(mock_server)
        .await;
}

async fn mock_availability(
    mock_server: &MockServer,
    provider_id: Uuid,
    windows: serde_json::Value,
    confirmed: serde_json::Value,
) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/availabilities"))
        .and(query_param("provider_id", format!("eq.{}", provider_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(windows))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("provider_id", format!("eq.{}", provider_id)))
        .and(query_param("confirmed", "eq.true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(confirmed))
        .mount(mock_server)
        .await;
}

struct ConfirmFixture {
    appointment_id: Uuid,
    client_id: Uuid,
    provider_id: Uuid,
    slot: DateTime<Utc>,
}

impl ConfirmFixture {
    fn new() -> Self {
        Self {
            appointment_id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            provider_id: Uuid::new_v4(),
            slot: test_now() + Duration::hours(48),
        }
    }

    fn appointment_row(&self, confirmed: bool, created_on: DateTime<Utc>) -> serde_json::Value {
        MockStoreResponses::appointment_row(
            &self.appointment_id.to_string(),
            &self.client_id.to_string(),
            &self.provider_id.to_string(),
            self.slot,
            confirmed,
            created_on,
        )
    }

    fn window_row(&self) -> serde_json::Value {
        MockStoreResponses::availability_row(
            &Uuid::new_v4().to_string(),
            &self.provider_id.to_string(),
            self.slot,
            self.slot + Duration::hours(1),
        )
    }
}

#[tokio::test]
async fn confirms_within_the_deadline() {
    let mock_server = MockServer::start().await;
    let fixture = ConfirmFixture::new();

    let created_on = test_now() - Duration::minutes(10);
    mock_appointment_lookup(
        &mock_server,
        fixture.appointment_id,
        json!([fixture.appointment_row(false, created_on)]),
    )
    .await;
    mock_availability(
        &mock_server,
        fixture.provider_id,
        json!([fixture.window_row()]),
        json!([]),
    )
    .await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("id", format!("eq.{}", fixture.appointment_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            fixture.appointment_row(true, created_on)
        ])))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let confirmed = service.confirm(fixture.appointment_id).await.unwrap();

    assert!(confirmed.confirmed);
    assert_eq!(confirmed.id, fixture.appointment_id);
}

#[tokio::test]
async fn fails_after_the_confirmation_deadline() {
    let mock_server = MockServer::start().await;
    let fixture = ConfirmFixture::new();

    let created_on = test_now() - Duration::minutes(31);
    mock_appointment_lookup(
        &mock_server,
        fixture.appointment_id,
        json!([fixture.appointment_row(false, created_on)]),
    )
    .await;
    mock_availability(
        &mock_server,
        fixture.provider_id,
        json!([fixture.window_row()]),
        json!([]),
    )
    .await;

    let service = service_for(&mock_server);
    let result = service.confirm(fixture.appointment_id).await;

    assert_matches!(
        result,
        Err(AppointmentError::ConfirmationExpired { deadline_minutes: 30 })
    );
}

#[tokio::test]
async fn fails_when_the_slot_was_claimed_by_a_rival_confirmed_booking() {
    let mock_server = MockServer::start().await;
    let fixture = ConfirmFixture::new();

    mock_appointment_lookup(
        &mock_server,
        fixture.appointment_id,
        json!([fixture.appointment_row(false, test_now() - Duration::minutes(5))]),
    )
    .await;
    mock_availability(
        &mock_server,
        fixture.provider_id,
        json!([fixture.window_row()]),
        json!([{ "appointment_time": fixture.slot.to_rfc3339() }]),
    )
    .await;

    let service = service_for(&mock_server);
    let result = service.confirm(fixture.appointment_id).await;

    assert_matches!(result, Err(AppointmentError::SlotTaken));
}

#[tokio::test]
async fn missing_appointment_is_not_found() {
    let mock_server = MockServer::start().await;
    let appointment_id = Uuid::new_v4();

    mock_appointment_lookup(&mock_server, appointment_id, json!([])).await;

    let service = service_for(&mock_server);
    let result = service.confirm(appointment_id).await;

    assert_matches!(result, Err(AppointmentError::NotFound));
}

#[tokio::test]
async fn reconfirming_is_a_noop() {
    let mock_server = MockServer::start().await;
    let fixture = ConfirmFixture::new();

    // Confirmed an hour ago, well past the deadline: must still return the
    // record untouched instead of failing the deadline check.
    mock_appointment_lookup(
        &mock_server,
        fixture.appointment_id,
        json!([fixture.appointment_row(true, test_now() - Duration::hours(1))]),
    )
    .await;

    let service = service_for(&mock_server);
    let appointment = service.confirm(fixture.appointment_id).await.unwrap();

    assert!(appointment.confirmed);
}
