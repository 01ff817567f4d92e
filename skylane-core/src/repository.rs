use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::admin::{Admin, CreateUserParams, User};
use crate::flight::{Flight, NewFlight};
use crate::ticket::Ticket;
use crate::RepositoryResult;

/// Repository trait for administrator records
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Create a user and its linked admin record atomically. Both writes
    /// succeed or neither is observable afterwards.
    async fn create_admin_tx(&self, params: CreateUserParams) -> RepositoryResult<User>;

    async fn list_admins(&self) -> RepositoryResult<Vec<Admin>>;

    /// Fails with `RepositoryError::NotFound` when no admin has that id.
    async fn get_admin(&self, admin_id: Uuid) -> RepositoryResult<Admin>;

    /// Fails with `RepositoryError::NotFound` when no admin is linked to
    /// that user.
    async fn get_admin_by_user(&self, user_id: i64) -> RepositoryResult<Admin>;

    async fn update_admin(&self, admin: Admin) -> RepositoryResult<Admin>;

    /// Remove the admin linked to the given user; `NotFound` if none exists.
    async fn delete_admin(&self, user_id: i64) -> RepositoryResult<()>;
}

/// Repository trait for flight data access
#[async_trait]
pub trait FlightRepository: Send + Sync {
    async fn create_flight(&self, flight: NewFlight) -> RepositoryResult<Flight>;

    /// Fails with `RepositoryError::NotFound` when no flight has that id.
    async fn get_flight(&self, flight_id: i64) -> RepositoryResult<Flight>;

    async fn list_flights(&self) -> RepositoryResult<Vec<Flight>>;

    /// City-pair search; matches on the calendar date of the departure
    /// timestamp.
    async fn search_flights(
        &self,
        departure_city: &str,
        arrival_city: &str,
        departure_date: NaiveDate,
    ) -> RepositoryResult<Vec<Flight>>;

    async fn update_flight_times(
        &self,
        flight_id: i64,
        departure_time: DateTime<Utc>,
        arrival_time: DateTime<Utc>,
    ) -> RepositoryResult<Flight>;
}

/// Repository trait for ticket data access
#[async_trait]
pub trait TicketRepository: Send + Sync {
    async fn list_tickets(&self) -> RepositoryResult<Vec<Ticket>>;

    async fn list_tickets_by_flight(&self, flight_id: i64) -> RepositoryResult<Vec<Ticket>>;
}
