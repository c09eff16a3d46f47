//! HTTP-level tests for the reservation check and claim endpoints.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tagwatch_core::{LookupOutcome, SessionCredential};
use tagwatch_xbl::ReserveClient;

fn credential() -> SessionCredential {
    SessionCredential::new("XBL3.0 x=123;token", "2533274800000000")
}

fn client_for(server: &MockServer) -> ReserveClient {
    ReserveClient::with_base_urls(server.uri(), server.uri()).unwrap()
}

#[tokio::test]
async fn check_available_when_handle_echoed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/gamertags/reserve"))
        .and(header("x-xbl-contract-version", "1"))
        .and(header("authorization", "XBL3.0 x=123;token"))
        .and(body_partial_json(json!({
            "gamertag": "Foo123",
            "reservationId": "2533274800000000",
            "targetGamertagFields": "gamertag"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "composedGamertag": "Foo123"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let outcome = client.check("Foo123", &credential()).await;

    assert_eq!(outcome, LookupOutcome::Available);
}

#[tokio::test]
async fn check_unavailable_when_service_composes_suffix() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/gamertags/reserve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "composedGamertag": "Foo123#4821"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let outcome = client.check("Foo123", &credential()).await;

    assert_eq!(
        outcome,
        LookupOutcome::Unavailable {
            composed: "Foo123#4821".to_string()
        }
    );
}

#[tokio::test]
async fn check_comparison_is_case_exact() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/gamertags/reserve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "composedGamertag": "foo123"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let outcome = client.check("Foo123", &credential()).await;

    assert!(matches!(outcome, LookupOutcome::Unavailable { .. }));
}

#[tokio::test]
async fn check_client_error_on_structured_400() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/gamertags/reserve"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": 1007,
            "description": "Invalid reservation id"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let outcome = client.check("Foo123", &credential()).await;

    assert_eq!(
        outcome,
        LookupOutcome::ClientError {
            code: 1007,
            description: "Invalid reservation id".to_string()
        }
    );
}

#[tokio::test]
async fn check_transport_error_on_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/gamertags/reserve"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let outcome = client.check("Foo123", &credential()).await;

    assert!(matches!(outcome, LookupOutcome::TransportError { .. }));
}

#[tokio::test]
async fn check_transport_error_on_undecodable_200_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/gamertags/reserve"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let outcome = client.check("Foo123", &credential()).await;

    assert!(matches!(outcome, LookupOutcome::TransportError { .. }));
}

#[tokio::test]
async fn check_transport_error_on_connection_failure() {
    // Nothing listens here; the connection itself must fail.
    let client =
        ReserveClient::with_base_urls("http://127.0.0.1:9", "http://127.0.0.1:9").unwrap();
    let outcome = client.check("Foo123", &credential()).await;

    assert!(matches!(outcome, LookupOutcome::TransportError { .. }));
}

#[tokio::test]
async fn claim_succeeds_on_200() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users/current/profile/gamertag"))
        .and(header("x-xbl-contract-version", "6"))
        .and(body_partial_json(json!({
            "reservationId": "2533274800000000",
            "gamertag": {
                "gamertag": "Foo123",
                "gamertagSuffix": "",
                "classicGamertag": "Foo123"
            },
            "preview": false,
            "useLegacyEntitlement": false
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.claim("Foo123", &credential()).await.unwrap();
}

#[tokio::test]
async fn claim_fails_with_service_description() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users/current/profile/gamertag"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": 1020,
            "description": "Reservation expired"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.claim("Foo123", &credential()).await.unwrap_err();

    assert!(err.to_string().contains("Reservation expired"));
}

#[tokio::test]
async fn claim_fails_on_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users/current/profile/gamertag"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.claim("Foo123", &credential()).await.unwrap_err();

    assert!(err.to_string().contains("500"));
}
