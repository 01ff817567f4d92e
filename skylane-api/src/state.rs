use std::sync::Arc;

use skylane_core::repository::{AdminRepository, FlightRepository, TicketRepository};

#[derive(Clone)]
pub struct AppState {
    pub admin_repo: Arc<dyn AdminRepository>,
    pub flight_repo: Arc<dyn FlightRepository>,
    pub ticket_repo: Arc<dyn TicketRepository>,
}
