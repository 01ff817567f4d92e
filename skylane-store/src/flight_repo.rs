use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use skylane_core::flight::{Flight, FlightStatus, NewFlight};
use skylane_core::repository::{FlightRepository, TicketRepository};
use skylane_core::ticket::{FlightClass, Seat, Ticket, TicketStatus};
use skylane_core::{RepositoryError, RepositoryResult};

pub struct PostgresFlightRepository {
    pub pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct FlightRow {
    flight_id: i64,
    flight_number: String,
    airline: String,
    aircraft_type: String,
    departure_city: String,
    arrival_city: String,
    departure_airport: String,
    arrival_airport: String,
    departure_time: DateTime<Utc>,
    arrival_time: DateTime<Utc>,
    base_price: i32,
    status: String,
}

impl From<FlightRow> for Flight {
    fn from(row: FlightRow) -> Self {
        Flight {
            flight_id: row.flight_id,
            flight_number: row.flight_number,
            airline: row.airline,
            aircraft_type: row.aircraft_type,
            departure_city: row.departure_city,
            arrival_city: row.arrival_city,
            departure_airport: row.departure_airport,
            arrival_airport: row.arrival_airport,
            departure_time: row.departure_time,
            arrival_time: row.arrival_time,
            base_price: row.base_price,
            // Rows written before the status column was constrained may
            // hold values outside the current vocabulary
            status: row.status.parse().unwrap_or(FlightStatus::Scheduled),
        }
    }
}

#[async_trait]
impl FlightRepository for PostgresFlightRepository {
    async fn create_flight(&self, flight: NewFlight) -> RepositoryResult<Flight> {
        let row: FlightRow = sqlx::query_as(
            r#"
            INSERT INTO flights (flight_number, airline, aircraft_type,
                departure_city, arrival_city, departure_airport, arrival_airport,
                departure_time, arrival_time, base_price, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING flight_id, flight_number, airline, aircraft_type,
                departure_city, arrival_city, departure_airport, arrival_airport,
                departure_time, arrival_time, base_price, status
            "#,
        )
        .bind(&flight.flight_number)
        .bind(&flight.airline)
        .bind(&flight.aircraft_type)
        .bind(&flight.departure_city)
        .bind(&flight.arrival_city)
        .bind(&flight.departure_airport)
        .bind(&flight.arrival_airport)
        .bind(flight.departure_time)
        .bind(flight.arrival_time)
        .bind(flight.base_price)
        .bind(flight.status.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::storage)?;

        Ok(row.into())
    }

    async fn get_flight(&self, flight_id: i64) -> RepositoryResult<Flight> {
        let row: Option<FlightRow> = sqlx::query_as(
            r#"
            SELECT flight_id, flight_number, airline, aircraft_type,
                departure_city, arrival_city, departure_airport, arrival_airport,
                departure_time, arrival_time, base_price, status
            FROM flights
            WHERE flight_id = $1
            "#,
        )
        .bind(flight_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::storage)?;

        row.map(Flight::from).ok_or(RepositoryError::NotFound)
    }

    async fn list_flights(&self) -> RepositoryResult<Vec<Flight>> {
        let rows: Vec<FlightRow> = sqlx::query_as(
            r#"
            SELECT flight_id, flight_number, airline, aircraft_type,
                departure_city, arrival_city, departure_airport, arrival_airport,
                departure_time, arrival_time, base_price, status
            FROM flights
            ORDER BY flight_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::storage)?;

        Ok(rows.into_iter().map(Flight::from).collect())
    }

    async fn search_flights(
        &self,
        departure_city: &str,
        arrival_city: &str,
        departure_date: NaiveDate,
    ) -> RepositoryResult<Vec<Flight>> {
        let rows: Vec<FlightRow> = sqlx::query_as(
            r#"
            SELECT flight_id, flight_number, airline, aircraft_type,
                departure_city, arrival_city, departure_airport, arrival_airport,
                departure_time, arrival_time, base_price, status
            FROM flights
            WHERE departure_city = $1
              AND arrival_city = $2
              AND DATE(departure_time) = $3
            ORDER BY departure_time
            "#,
        )
        .bind(departure_city)
        .bind(arrival_city)
        .bind(departure_date)
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::storage)?;

        Ok(rows.into_iter().map(Flight::from).collect())
    }

    async fn update_flight_times(
        &self,
        flight_id: i64,
        departure_time: DateTime<Utc>,
        arrival_time: DateTime<Utc>,
    ) -> RepositoryResult<Flight> {
        let row: Option<FlightRow> = sqlx::query_as(
            r#"
            UPDATE flights
            SET departure_time = $2, arrival_time = $3
            WHERE flight_id = $1
            RETURNING flight_id, flight_number, airline, aircraft_type,
                departure_city, arrival_city, departure_airport, arrival_airport,
                departure_time, arrival_time, base_price, status
            "#,
        )
        .bind(flight_id)
        .bind(departure_time)
        .bind(arrival_time)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::storage)?;

        row.map(Flight::from).ok_or(RepositoryError::NotFound)
    }
}

pub struct PostgresTicketRepository {
    pub pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct TicketRow {
    ticket_id: i64,
    flight_id: i64,
    seat_code: String,
    price: i32,
    flight_class: String,
    status: String,
}

impl From<TicketRow> for Ticket {
    fn from(row: TicketRow) -> Self {
        Ticket {
            ticket_id: row.ticket_id,
            flight_id: row.flight_id,
            seat: Seat {
                seat_code: row.seat_code,
            },
            price: row.price,
            flight_class: row.flight_class.parse().unwrap_or(FlightClass::Economy),
            status: row.status.parse().unwrap_or(TicketStatus::Booked),
        }
    }
}

#[async_trait]
impl TicketRepository for PostgresTicketRepository {
    async fn list_tickets(&self) -> RepositoryResult<Vec<Ticket>> {
        let rows: Vec<TicketRow> = sqlx::query_as(
            r#"
            SELECT ticket_id, flight_id, seat_code, price, flight_class, status
            FROM tickets
            ORDER BY ticket_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::storage)?;

        Ok(rows.into_iter().map(Ticket::from).collect())
    }

    async fn list_tickets_by_flight(&self, flight_id: i64) -> RepositoryResult<Vec<Ticket>> {
        let rows: Vec<TicketRow> = sqlx::query_as(
            r#"
            SELECT ticket_id, flight_id, seat_code, price, flight_class, status
            FROM tickets
            WHERE flight_id = $1
            ORDER BY ticket_id
            "#,
        )
        .bind(flight_id)
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::storage)?;

        Ok(rows.into_iter().map(Ticket::from).collect())
    }
}
