use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use skylane_core::admin::{Admin, CreateUserParams, User};
use skylane_core::flight::{Flight, NewFlight};
use skylane_core::repository::{AdminRepository, FlightRepository, TicketRepository};
use skylane_core::ticket::{FlightClass, Seat, Ticket, TicketStatus};
use skylane_core::{RepositoryError, RepositoryResult};

/// In-memory backend implementing every repository trait. Backs the API
/// integration tests and runs the server without a database.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<i64, User>,
    admins: Vec<Admin>,
    flights: Vec<Flight>,
    tickets: Vec<Ticket>,
    next_user_id: i64,
    next_flight_id: i64,
    next_ticket_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("store mutex poisoned")
    }

    /// Seed a ticket directly; tickets have no create endpoint here.
    pub fn insert_ticket(
        &self,
        flight_id: i64,
        seat_code: &str,
        price: i32,
        flight_class: FlightClass,
        status: TicketStatus,
    ) -> Ticket {
        let mut inner = self.lock();
        inner.next_ticket_id += 1;
        let ticket = Ticket {
            ticket_id: inner.next_ticket_id,
            flight_id,
            seat: Seat {
                seat_code: seat_code.to_string(),
            },
            price,
            flight_class,
            status,
        };
        inner.tickets.push(ticket.clone());
        ticket
    }
}

#[async_trait]
impl AdminRepository for MemoryStore {
    async fn create_admin_tx(&self, params: CreateUserParams) -> RepositoryResult<User> {
        let mut inner = self.lock();

        // Reject duplicates before inserting either row; a failed create
        // must leave no partial state
        if inner.users.values().any(|u| u.email == params.email) {
            return Err(RepositoryError::storage(format!(
                "email already registered: {}",
                params.email
            )));
        }

        inner.next_user_id += 1;
        let user = User {
            user_id: inner.next_user_id,
            email: params.email,
            password_hash: params.password_hash,
            first_name: params.first_name,
            last_name: params.last_name,
            created_at: Utc::now(),
        };
        inner.users.insert(user.user_id, user.clone());
        inner.admins.push(Admin::new(user.user_id));

        Ok(user)
    }

    async fn list_admins(&self) -> RepositoryResult<Vec<Admin>> {
        Ok(self.lock().admins.clone())
    }

    async fn get_admin(&self, admin_id: Uuid) -> RepositoryResult<Admin> {
        self.lock()
            .admins
            .iter()
            .find(|a| a.id == admin_id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn get_admin_by_user(&self, user_id: i64) -> RepositoryResult<Admin> {
        self.lock()
            .admins
            .iter()
            .find(|a| a.user_id == user_id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn update_admin(&self, admin: Admin) -> RepositoryResult<Admin> {
        let mut inner = self.lock();
        let existing = inner
            .admins
            .iter_mut()
            .find(|a| a.id == admin.id)
            .ok_or(RepositoryError::NotFound)?;

        existing.user_id = admin.user_id;
        existing.updated_at = Utc::now();
        Ok(existing.clone())
    }

    async fn delete_admin(&self, user_id: i64) -> RepositoryResult<()> {
        let mut inner = self.lock();
        let before = inner.admins.len();
        inner.admins.retain(|a| a.user_id != user_id);

        if inner.admins.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl FlightRepository for MemoryStore {
    async fn create_flight(&self, flight: NewFlight) -> RepositoryResult<Flight> {
        let mut inner = self.lock();
        inner.next_flight_id += 1;
        let flight = Flight {
            flight_id: inner.next_flight_id,
            flight_number: flight.flight_number,
            airline: flight.airline,
            aircraft_type: flight.aircraft_type,
            departure_city: flight.departure_city,
            arrival_city: flight.arrival_city,
            departure_airport: flight.departure_airport,
            arrival_airport: flight.arrival_airport,
            departure_time: flight.departure_time,
            arrival_time: flight.arrival_time,
            base_price: flight.base_price,
            status: flight.status,
        };
        inner.flights.push(flight.clone());
        Ok(flight)
    }

    async fn get_flight(&self, flight_id: i64) -> RepositoryResult<Flight> {
        self.lock()
            .flights
            .iter()
            .find(|f| f.flight_id == flight_id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn list_flights(&self) -> RepositoryResult<Vec<Flight>> {
        Ok(self.lock().flights.clone())
    }

    async fn search_flights(
        &self,
        departure_city: &str,
        arrival_city: &str,
        departure_date: NaiveDate,
    ) -> RepositoryResult<Vec<Flight>> {
        Ok(self
            .lock()
            .flights
            .iter()
            .filter(|f| {
                f.departure_city == departure_city
                    && f.arrival_city == arrival_city
                    && f.departure_time.date_naive() == departure_date
            })
            .cloned()
            .collect())
    }

    async fn update_flight_times(
        &self,
        flight_id: i64,
        departure_time: DateTime<Utc>,
        arrival_time: DateTime<Utc>,
    ) -> RepositoryResult<Flight> {
        let mut inner = self.lock();
        let flight = inner
            .flights
            .iter_mut()
            .find(|f| f.flight_id == flight_id)
            .ok_or(RepositoryError::NotFound)?;

        flight.departure_time = departure_time;
        flight.arrival_time = arrival_time;
        Ok(flight.clone())
    }
}

#[async_trait]
impl TicketRepository for MemoryStore {
    async fn list_tickets(&self) -> RepositoryResult<Vec<Ticket>> {
        Ok(self.lock().tickets.clone())
    }

    async fn list_tickets_by_flight(&self, flight_id: i64) -> RepositoryResult<Vec<Ticket>> {
        Ok(self
            .lock()
            .tickets
            .iter()
            .filter(|t| t.flight_id == flight_id)
            .cloned()
            .collect())
    }
}
