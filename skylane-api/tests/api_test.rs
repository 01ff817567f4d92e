use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use skylane_api::{app, AppState};
use skylane_core::flight::{FlightStatus, NewFlight};
use skylane_core::repository::FlightRepository;
use skylane_core::ticket::{FlightClass, TicketStatus};
use skylane_store::MemoryStore;

fn test_app() -> (Arc<MemoryStore>, Router) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState {
        admin_repo: store.clone(),
        flight_repo: store.clone(),
        ticket_repo: store.clone(),
    };
    (store, app(state))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("request failed");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn flight_body(departure_city: &str, arrival_city: &str, departure_time: &str) -> Value {
    json!({
        "flightNumber": "SL101",
        "airline": "Skylane Air",
        "aircraftType": "A321",
        "departureCity": departure_city,
        "arrivalCity": arrival_city,
        "departureAirport": "HAN",
        "arrivalAirport": "SGN",
        "departureTime": departure_time,
        "arrivalTime": "2024-01-01T12:00:00Z",
        "basePrice": 15000,
        "status": "scheduled"
    })
}

#[tokio::test]
async fn test_create_then_get_flight() {
    let (_store, app) = test_app();

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/v1/flights",
            flight_body("Hanoi", "Saigon", "2024-01-01T10:00:00Z"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], json!("Flight created successfully."));
    assert_eq!(body["flight"]["flightNumber"], json!("SL101"));

    let (status, body) = send(&app, get("/v1/flights/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["flightId"], json!("1"));
    assert_eq!(body["departureTime"]["seconds"], json!(1_704_103_200_i64));
    assert_eq!(body["arrivalTime"]["seconds"], json!(1_704_110_400_i64));
    assert_eq!(body["basePrice"], json!(15000));
    assert_eq!(body["status"], json!("scheduled"));
}

#[tokio::test]
async fn test_get_missing_flight_is_404() {
    let (_store, app) = test_app();

    let (status, body) = send(&app, get("/v1/flights/99")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_list_flights_preserves_order() {
    let (_store, app) = test_app();

    for city in ["Saigon", "Danang"] {
        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/v1/flights",
                flight_body("Hanoi", city, "2024-01-01T10:00:00Z"),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, get("/v1/flights")).await;
    assert_eq!(status, StatusCode::OK);
    let flights = body.as_array().expect("array body");
    assert_eq!(flights.len(), 2);
    assert_eq!(flights[0]["flightId"], json!("1"));
    assert_eq!(flights[1]["flightId"], json!("2"));
    assert_eq!(flights[1]["arrivalCity"], json!("Danang"));
}

#[tokio::test]
async fn test_search_uses_fixed_utc_strings() {
    let (_store, app) = test_app();

    send(
        &app,
        json_request(
            "POST",
            "/v1/flights",
            flight_body("Hanoi", "Saigon", "2024-01-01T10:00:00Z"),
        ),
    )
    .await;

    let (status, body) = send(
        &app,
        get("/v1/flights/search?departureCity=Hanoi&arrivalCity=Saigon&departureDate=2024-01-01"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let hits = body.as_array().expect("array body");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["departureTime"], json!("2024-01-01T10:00:00Z"));
    assert_eq!(hits[0]["airline"], json!("Skylane Air"));

    // Different date, no hits, still an empty array rather than null
    let (status, body) = send(
        &app,
        get("/v1/flights/search?departureCity=Hanoi&arrivalCity=Saigon&departureDate=2024-01-02"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_update_times_keeps_numeric_id() {
    let (_store, app) = test_app();

    send(
        &app,
        json_request(
            "POST",
            "/v1/flights",
            flight_body("Hanoi", "Saigon", "2024-01-01T10:00:00Z"),
        ),
    )
    .await;

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            "/v1/flights/1/times",
            json!({
                "departureTime": "2024-01-01T11:30:00Z",
                "arrivalTime": "2024-01-01T13:30:00Z"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["flightId"].is_i64());
    assert_eq!(body["flightId"], json!(1));
    assert_eq!(body["departureTime"]["seconds"], json!(1_704_108_600_i64));
}

#[tokio::test]
async fn test_flights_with_tickets_grouping() {
    let (store, app) = test_app();

    let f1 = store
        .create_flight(NewFlight {
            flight_number: "SL101".to_string(),
            airline: "Skylane Air".to_string(),
            aircraft_type: "A321".to_string(),
            departure_city: "Hanoi".to_string(),
            arrival_city: "Saigon".to_string(),
            departure_airport: "HAN".to_string(),
            arrival_airport: "SGN".to_string(),
            departure_time: "2024-01-01T10:00:00Z".parse().unwrap(),
            arrival_time: "2024-01-01T12:00:00Z".parse().unwrap(),
            base_price: 15000,
            status: FlightStatus::Scheduled,
        })
        .await
        .unwrap();

    store.insert_ticket(f1.flight_id, "12A", 15000, FlightClass::Economy, TicketStatus::Booked);
    store.insert_ticket(f1.flight_id, "1B", 42000, FlightClass::Business, TicketStatus::Active);
    // Orphan ticket, referencing no flight in the store
    store.insert_ticket(999, "9F", 15000, FlightClass::Economy, TicketStatus::Booked);

    let (status, body) = send(&app, get("/v1/flights/tickets")).await;
    assert_eq!(status, StatusCode::OK);

    let flights = body["flights"].as_array().expect("flights array");
    assert_eq!(flights.len(), 1);
    let tickets = flights[0]["ticketList"].as_array().expect("ticket list");
    assert_eq!(tickets.len(), 2);
    assert_eq!(tickets[0]["seatCode"], json!("12A"));
    assert_eq!(tickets[1]["flightClass"], json!("business"));
}

#[tokio::test]
async fn test_admin_crud_flow() {
    let (_store, app) = test_app();

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/v1/admins",
            json!({
                "email": "ops@skylane.test",
                "passwordHash": "argon2-hash",
                "firstName": "Ada",
                "lastName": "Nguyen"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["userId"], json!(1));
    assert_eq!(body["user"]["email"], json!("ops@skylane.test"));

    let (status, body) = send(&app, get("/v1/admins")).await;
    assert_eq!(status, StatusCode::OK);
    let admins = body.as_array().expect("array body");
    assert_eq!(admins.len(), 1);
    let admin_id = admins[0]["id"].as_str().expect("admin id").to_string();

    let (status, body) = send(&app, get(&format!("/v1/admins/{admin_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userId"], json!(1));

    let (status, body) = send(&app, get("/v1/admins/by-user/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!(admin_id));

    let (status, _) = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri("/v1/admins/by-user/1")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, get("/v1/admins/by-user/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_get_unknown_admin_is_404_not_500() {
    let (_store, app) = test_app();

    let (status, body) = send(
        &app,
        get("/v1/admins/00000000-0000-0000-0000-000000000000"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}
