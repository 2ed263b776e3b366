use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use appointment_cell::router::appointment_routes;
use shared_utils::test_utils::{MockStoreResponses, TestConfig};

fn create_test_app(mock_server: &MockServer) -> Router {
    appointment_routes(TestConfig::with_store_url(&mock_server.uri()).to_arc())
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn reserves_a_valid_slot_end_to_end() {
    let mock_server = MockServer::start().await;
    let client_id = Uuid::new_v4();
    let provider_id = Uuid::new_v4();
    let appointment_id = Uuid::new_v4();

    // The handler path runs on the system clock, so anchor the window two
    // days out from the real now.
    let slot = Utc::now() + Duration::hours(48);

    Mock::given(method("GET"))
        .and(path("/rest/v1/clients"))
        .and(query_param("id", format!("eq.{}", client_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::client_row(&client_id.to_string(), "Alice")
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/providers"))
        .and(query_param("id", format!("eq.{}", provider_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::provider_row(&provider_id.to_string(), "Dr. Jekyll")
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/availabilities"))
        .and(query_param("provider_id", format!("eq.{}", provider_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::availability_row(
                &Uuid::new_v4().to_string(),
                &provider_id.to_string(),
                slot,
                slot + Duration::hours(1),
            )
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("provider_id", format!("eq.{}", provider_id)))
        .and(query_param("confirmed", "eq.true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockStoreResponses::appointment_row(
                &appointment_id.to_string(),
                &client_id.to_string(),
                &provider_id.to_string(),
                slot,
                false,
                Utc::now(),
            )
        ])))
        .mount(&mock_server)
        .await;

    let request_body = json!({
        "client_id": client_id,
        "provider_id": provider_id,
        "appointment_time": slot
    });

    let app = create_test_app(&mock_server);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("content-type", "application/json")
                .body(Body::from(request_body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], appointment_id.to_string());
    assert_eq!(body["confirmed"], false);
}

#[tokio::test]
async fn short_notice_reservation_returns_400() {
    let mock_server = MockServer::start().await;
    let client_id = Uuid::new_v4();
    let provider_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/clients"))
        .and(query_param("id", format!("eq.{}", client_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::client_row(&client_id.to_string(), "Alice")
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/providers"))
        .and(query_param("id", format!("eq.{}", provider_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::provider_row(&provider_id.to_string(), "Dr. Jekyll")
        ])))
        .mount(&mock_server)
        .await;

    let request_body = json!({
        "client_id": client_id,
        "provider_id": provider_id,
        "appointment_time": Utc::now() + Duration::hours(1)
    });

    let app = create_test_app(&mock_server);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("content-type", "application/json")
                .body(Body::from(request_body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_appointment_returns_404() {
    let mock_server = MockServer::start().await;
    let appointment_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("id", format!("eq.{}", appointment_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let app = create_test_app(&mock_server);
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/{}", appointment_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn lists_confirmed_appointments_for_a_client() {
    let mock_server = MockServer::start().await;
    let client_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("client_id", format!("eq.{}", client_id)))
        .and(query_param("confirmed", "eq.true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::appointment_row(
                &Uuid::new_v4().to_string(),
                &client_id.to_string(),
                &Uuid::new_v4().to_string(),
                Utc::now() + Duration::hours(72),
                true,
                Utc::now(),
            )
        ])))
        .mount(&mock_server)
        .await;

    let app = create_test_app(&mock_server);
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/clients/{}", client_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["appointments"][0]["client_id"], client_id.to_string());
}

#[tokio::test]
async fn lists_confirmed_appointments_for_a_provider() {
    let mock_server = MockServer::start().await;
    let provider_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .and(query_param("provider_id", format!("eq.{}", provider_id)))
        .and(query_param("confirmed", "eq.true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::appointment_row(
                &Uuid::new_v4().to_string(),
                &Uuid::new_v4().to_string(),
                &provider_id.to_string(),
                Utc::now() + Duration::hours(72),
                true,
                Utc::now(),
            )
        ])))
        .mount(&mock_server)
        .await;

    let app = create_test_app(&mock_server);
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/providers/{}", provider_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["appointments"][0]["confirmed"], true);
}
