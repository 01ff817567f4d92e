//! Entity-to-response mapping for the flight API.
//!
//! Every function here is a pure transformation: no I/O, no state, the same
//! input always yields the same output. Field names and shapes are pinned to
//! the wire contract the web frontend consumes, including the places where
//! the contract is uneven (flight ids are decimal strings in most responses
//! but a plain number in the update-times response).

use chrono::{DateTime, Utc};
use serde::Serialize;

use skylane_core::flight::Flight;
use skylane_core::ticket::Ticket;

pub const FLIGHT_CREATED_MESSAGE: &str = "Flight created successfully.";

/// UTC timestamp pattern used by search responses
const SEARCH_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

// ============================================================================
// Response Types
// ============================================================================

/// Seconds-since-epoch timestamp object, `{"seconds": N}` on the wire
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TimeSeconds {
    pub seconds: i64,
}

impl From<DateTime<Utc>> for TimeSeconds {
    fn from(t: DateTime<Utc>) -> Self {
        TimeSeconds {
            seconds: t.timestamp(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateFlightResponse {
    pub message: String,
    pub flight: FlightPayload,
}

/// Flight fields echoed back after creation; timestamps keep their default
/// rendering
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightPayload {
    pub flight_number: String,
    pub aircraft_type: String,
    pub departure_city: String,
    pub arrival_city: String,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub base_price: i32,
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetFlightResponse {
    /// Decimal string, not a number
    pub flight_id: String,
    pub flight_number: String,
    pub aircraft_type: String,
    pub departure_city: String,
    pub arrival_city: String,
    pub departure_time: TimeSeconds,
    pub arrival_time: TimeSeconds,
    pub base_price: i32,
    pub status: String,
}

/// Unlike every other flight response, the id stays numeric here
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFlightTimesResponse {
    pub flight_id: i64,
    pub departure_time: TimeSeconds,
    pub arrival_time: TimeSeconds,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAllFlightsResponse {
    pub flight_id: String,
    pub flight_number: String,
    pub aircraft_type: String,
    pub departure_city: String,
    pub arrival_city: String,
    pub departure_time: TimeSeconds,
    pub arrival_time: TimeSeconds,
    pub base_price: i32,
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSearchResponse {
    pub flight_id: String,
    pub flight_number: String,
    pub airline: String,
    pub departure_city: String,
    pub arrival_city: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub aircraft_type: String,
    pub base_price: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketResponse {
    pub ticket_id: i64,
    pub seat_code: String,
    pub price: i32,
    pub flight_class: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightWithTickets {
    pub flight_id: String,
    pub flight_number: String,
    pub aircraft_type: String,
    pub departure_city: String,
    pub arrival_city: String,
    pub departure_time: TimeSeconds,
    pub arrival_time: TimeSeconds,
    pub base_price: i32,
    pub status: String,
    pub ticket_list: Vec<TicketResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetFlightsWithTicketsResponse {
    pub flights: Vec<FlightWithTickets>,
}

// ============================================================================
// Mapping Functions
// ============================================================================

pub fn to_create_response(flight: &Flight) -> CreateFlightResponse {
    CreateFlightResponse {
        message: FLIGHT_CREATED_MESSAGE.to_string(),
        flight: FlightPayload {
            flight_number: flight.flight_number.clone(),
            aircraft_type: flight.aircraft_type.clone(),
            departure_city: flight.departure_city.clone(),
            arrival_city: flight.arrival_city.clone(),
            departure_airport: flight.departure_airport.clone(),
            arrival_airport: flight.arrival_airport.clone(),
            departure_time: flight.departure_time.to_string(),
            arrival_time: flight.arrival_time.to_string(),
            base_price: flight.base_price,
            status: flight.status.to_string(),
        },
    }
}

pub fn to_get_response(flight: &Flight) -> GetFlightResponse {
    GetFlightResponse {
        flight_id: flight.flight_id.to_string(),
        flight_number: flight.flight_number.clone(),
        aircraft_type: flight.aircraft_type.clone(),
        departure_city: flight.departure_city.clone(),
        arrival_city: flight.arrival_city.clone(),
        departure_time: flight.departure_time.into(),
        arrival_time: flight.arrival_time.into(),
        base_price: flight.base_price,
        status: flight.status.to_string(),
    }
}

pub fn to_update_times_response(flight: &Flight) -> UpdateFlightTimesResponse {
    UpdateFlightTimesResponse {
        flight_id: flight.flight_id,
        departure_time: flight.departure_time.into(),
        arrival_time: flight.arrival_time.into(),
    }
}

pub fn to_list_responses(flights: &[Flight]) -> Vec<GetAllFlightsResponse> {
    flights
        .iter()
        .map(|flight| GetAllFlightsResponse {
            flight_id: flight.flight_id.to_string(),
            flight_number: flight.flight_number.clone(),
            aircraft_type: flight.aircraft_type.clone(),
            departure_city: flight.departure_city.clone(),
            arrival_city: flight.arrival_city.clone(),
            departure_time: flight.departure_time.into(),
            arrival_time: flight.arrival_time.into(),
            base_price: flight.base_price,
            status: flight.status.to_string(),
        })
        .collect()
}

pub fn to_search_responses(flights: &[Flight]) -> Vec<FlightSearchResponse> {
    flights
        .iter()
        .map(|flight| FlightSearchResponse {
            flight_id: flight.flight_id.to_string(),
            flight_number: flight.flight_number.clone(),
            airline: flight.airline.clone(),
            departure_city: flight.departure_city.clone(),
            arrival_city: flight.arrival_city.clone(),
            departure_time: flight.departure_time.format(SEARCH_TIME_FORMAT).to_string(),
            arrival_time: flight.arrival_time.format(SEARCH_TIME_FORMAT).to_string(),
            departure_airport: flight.departure_airport.clone(),
            arrival_airport: flight.arrival_airport.clone(),
            aircraft_type: flight.aircraft_type.clone(),
            base_price: flight.base_price,
        })
        .collect()
}

pub fn to_ticket_responses(tickets: &[Ticket]) -> Vec<TicketResponse> {
    tickets
        .iter()
        .map(|ticket| TicketResponse {
            ticket_id: ticket.ticket_id,
            seat_code: ticket.seat.seat_code.clone(),
            price: ticket.price,
            flight_class: ticket.flight_class.to_string(),
            status: ticket.status.to_string(),
        })
        .collect()
}

/// Attach each flight's tickets to its response entry. Tickets are matched
/// by a linear scan per flight; a ticket whose flight id matches no flight
/// in the slice is dropped from the view.
pub fn to_flights_with_tickets(
    flights: &[Flight],
    tickets: &[Ticket],
) -> GetFlightsWithTicketsResponse {
    let flights = flights
        .iter()
        .map(|flight| {
            let matching: Vec<Ticket> = tickets
                .iter()
                .filter(|ticket| ticket.flight_id == flight.flight_id)
                .cloned()
                .collect();

            FlightWithTickets {
                flight_id: flight.flight_id.to_string(),
                flight_number: flight.flight_number.clone(),
                aircraft_type: flight.aircraft_type.clone(),
                departure_city: flight.departure_city.clone(),
                arrival_city: flight.arrival_city.clone(),
                departure_time: flight.departure_time.into(),
                arrival_time: flight.arrival_time.into(),
                base_price: flight.base_price,
                status: flight.status.to_string(),
                ticket_list: to_ticket_responses(&matching),
            }
        })
        .collect();

    GetFlightsWithTicketsResponse { flights }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use skylane_core::flight::FlightStatus;
    use skylane_core::ticket::{FlightClass, Seat, TicketStatus};

    fn sample_flight(flight_id: i64) -> Flight {
        Flight {
            flight_id,
            flight_number: format!("SL{flight_id:03}"),
            airline: "Skylane Air".to_string(),
            aircraft_type: "A321".to_string(),
            departure_city: "Hanoi".to_string(),
            arrival_city: "Saigon".to_string(),
            departure_airport: "HAN".to_string(),
            arrival_airport: "SGN".to_string(),
            departure_time: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
            arrival_time: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            base_price: 15000,
            status: FlightStatus::Scheduled,
        }
    }

    fn sample_ticket(ticket_id: i64, flight_id: i64) -> Ticket {
        Ticket {
            ticket_id,
            flight_id,
            seat: Seat {
                seat_code: "12A".to_string(),
            },
            price: 15000,
            flight_class: FlightClass::Economy,
            status: TicketStatus::Booked,
        }
    }

    #[test]
    fn test_get_response_renders_id_string_and_epoch_seconds() {
        let response = to_get_response(&sample_flight(42));

        assert_eq!(response.flight_id, "42");
        assert_eq!(response.departure_time.seconds, 1_704_103_200);
        assert_eq!(response.arrival_time.seconds, 1_704_110_400);
        assert_eq!(response.base_price, 15000);
        assert_eq!(response.status, "scheduled");
    }

    #[test]
    fn test_get_response_wire_shape() {
        let value = serde_json::to_value(to_get_response(&sample_flight(42))).unwrap();

        assert_eq!(value["flightId"], serde_json::json!("42"));
        assert_eq!(value["flightNumber"], serde_json::json!("SL042"));
        assert_eq!(value["departureTime"]["seconds"], serde_json::json!(1_704_103_200));
        assert_eq!(value["basePrice"], serde_json::json!(15000));
    }

    #[test]
    fn test_create_response_carries_fixed_message() {
        let flight = sample_flight(7);
        let response = to_create_response(&flight);

        assert_eq!(response.message, "Flight created successfully.");
        assert_eq!(response.flight.flight_number, "SL007");
        // Default chrono rendering, not an epoch or ISO pattern
        assert_eq!(response.flight.departure_time, flight.departure_time.to_string());
        assert_eq!(response.flight.base_price, 15000);
    }

    #[test]
    fn test_update_times_response_keeps_numeric_id() {
        let response = to_update_times_response(&sample_flight(42));
        assert_eq!(response.flight_id, 42);

        let value = serde_json::to_value(&response).unwrap();
        assert!(value["flightId"].is_i64());
        assert_eq!(value["departureTime"]["seconds"], serde_json::json!(1_704_103_200));
    }

    #[test]
    fn test_list_preserves_length_and_order() {
        let flights = vec![sample_flight(3), sample_flight(1), sample_flight(2)];
        let responses = to_list_responses(&flights);

        assert_eq!(responses.len(), flights.len());
        let ids: Vec<&str> = responses.iter().map(|r| r.flight_id.as_str()).collect();
        assert_eq!(ids, ["3", "1", "2"]);
    }

    #[test]
    fn test_empty_list_maps_to_empty_not_null() {
        let responses = to_list_responses(&[]);
        assert!(responses.is_empty());

        let value = serde_json::to_value(&responses).unwrap();
        assert_eq!(value, serde_json::json!([]));
    }

    #[test]
    fn test_search_response_uses_fixed_utc_pattern() {
        let responses = to_search_responses(&[sample_flight(42)]);

        assert_eq!(responses[0].departure_time, "2024-01-01T10:00:00Z");
        assert_eq!(responses[0].arrival_time, "2024-01-01T12:00:00Z");
        assert_eq!(responses[0].airline, "Skylane Air");
        assert_eq!(responses[0].flight_id, "42");
    }

    #[test]
    fn test_tickets_group_under_matching_flight() {
        let flights = vec![sample_flight(1), sample_flight(2)];
        let tickets = vec![
            sample_ticket(10, 1),
            sample_ticket(11, 2),
            sample_ticket(12, 1),
            // References no flight in the slice; dropped from the view
            sample_ticket(13, 99),
        ];

        let response = to_flights_with_tickets(&flights, &tickets);

        assert_eq!(response.flights.len(), 2);
        assert_eq!(response.flights[0].ticket_list.len(), 2);
        assert_eq!(response.flights[1].ticket_list.len(), 1);

        let grouped: usize = response.flights.iter().map(|f| f.ticket_list.len()).sum();
        assert_eq!(grouped, 3);
    }

    #[test]
    fn test_flight_without_tickets_gets_empty_list() {
        let response = to_flights_with_tickets(&[sample_flight(1)], &[]);

        assert_eq!(response.flights.len(), 1);
        assert!(response.flights[0].ticket_list.is_empty());

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["flights"][0]["ticketList"], serde_json::json!([]));
    }

    #[test]
    fn test_ticket_response_shapes_enums_as_strings() {
        let responses = to_ticket_responses(&[sample_ticket(10, 1)]);

        assert_eq!(responses[0].ticket_id, 10);
        assert_eq!(responses[0].seat_code, "12A");
        assert_eq!(responses[0].flight_class, "economy");
        assert_eq!(responses[0].status, "booked");
        assert_eq!(responses[0].price, 15000);
    }
}
