use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::error::AppError;
use crate::mappers::{
    self, CreateFlightResponse, FlightSearchResponse, GetAllFlightsResponse, GetFlightResponse,
    GetFlightsWithTicketsResponse, UpdateFlightTimesResponse,
};
use crate::state::AppState;
use skylane_core::flight::{FlightStatus, NewFlight};

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFlightRequest {
    pub flight_number: String,
    pub airline: String,
    pub aircraft_type: String,
    pub departure_city: String,
    pub arrival_city: String,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub base_price: i32,
    pub status: Option<FlightStatus>,
}

impl From<CreateFlightRequest> for NewFlight {
    fn from(req: CreateFlightRequest) -> Self {
        NewFlight {
            flight_number: req.flight_number,
            airline: req.airline,
            aircraft_type: req.aircraft_type,
            departure_city: req.departure_city,
            arrival_city: req.arrival_city,
            departure_airport: req.departure_airport,
            arrival_airport: req.arrival_airport,
            departure_time: req.departure_time,
            arrival_time: req.arrival_time,
            base_price: req.base_price,
            status: req.status.unwrap_or(FlightStatus::Scheduled),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFlightsQuery {
    pub departure_city: String,
    pub arrival_city: String,
    pub departure_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFlightTimesRequest {
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/flights
pub async fn create_flight(
    State(state): State<AppState>,
    Json(req): Json<CreateFlightRequest>,
) -> Result<(StatusCode, Json<CreateFlightResponse>), AppError> {
    let flight = state.flight_repo.create_flight(req.into()).await?;
    tracing::info!(flight_id = flight.flight_id, "flight created");

    Ok((StatusCode::CREATED, Json(mappers::to_create_response(&flight))))
}

/// GET /v1/flights
pub async fn list_flights(
    State(state): State<AppState>,
) -> Result<Json<Vec<GetAllFlightsResponse>>, AppError> {
    let flights = state.flight_repo.list_flights().await?;
    Ok(Json(mappers::to_list_responses(&flights)))
}

/// GET /v1/flights/search?departureCity=..&arrivalCity=..&departureDate=..
pub async fn search_flights(
    State(state): State<AppState>,
    Query(query): Query<SearchFlightsQuery>,
) -> Result<Json<Vec<FlightSearchResponse>>, AppError> {
    let flights = state
        .flight_repo
        .search_flights(&query.departure_city, &query.arrival_city, query.departure_date)
        .await?;

    Ok(Json(mappers::to_search_responses(&flights)))
}

/// GET /v1/flights/{id}
pub async fn get_flight(
    State(state): State<AppState>,
    Path(flight_id): Path<i64>,
) -> Result<Json<GetFlightResponse>, AppError> {
    let flight = state.flight_repo.get_flight(flight_id).await?;
    Ok(Json(mappers::to_get_response(&flight)))
}

/// PUT /v1/flights/{id}/times
pub async fn update_flight_times(
    State(state): State<AppState>,
    Path(flight_id): Path<i64>,
    Json(req): Json<UpdateFlightTimesRequest>,
) -> Result<Json<UpdateFlightTimesResponse>, AppError> {
    let flight = state
        .flight_repo
        .update_flight_times(flight_id, req.departure_time, req.arrival_time)
        .await?;

    Ok(Json(mappers::to_update_times_response(&flight)))
}

/// GET /v1/flights/tickets
///
/// Admin view: every flight with its ticket list attached.
pub async fn list_flights_with_tickets(
    State(state): State<AppState>,
) -> Result<Json<GetFlightsWithTicketsResponse>, AppError> {
    let flights = state.flight_repo.list_flights().await?;
    let tickets = state.ticket_repo.list_tickets().await?;

    Ok(Json(mappers::to_flights_with_tickets(&flights, &tickets)))
}
