use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cabin class a ticket is sold in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FlightClass {
    Economy,
    Business,
    FirstClass,
}

impl FlightClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlightClass::Economy => "economy",
            FlightClass::Business => "business",
            FlightClass::FirstClass => "firstClass",
        }
    }
}

impl fmt::Display for FlightClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown flight class: {0}")]
pub struct ParseFlightClassError(String);

impl FromStr for FlightClass {
    type Err = ParseFlightClassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "economy" => Ok(FlightClass::Economy),
            "business" => Ok(FlightClass::Business),
            "firstClass" => Ok(FlightClass::FirstClass),
            other => Err(ParseFlightClassError(other.to_string())),
        }
    }
}

/// Ticket status in the booking lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TicketStatus {
    Active,
    Booked,
    CheckedIn,
    Cancelled,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Active => "active",
            TicketStatus::Booked => "booked",
            TicketStatus::CheckedIn => "checkedIn",
            TicketStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown ticket status: {0}")]
pub struct ParseTicketStatusError(String);

impl FromStr for TicketStatus {
    type Err = ParseTicketStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(TicketStatus::Active),
            "booked" => Ok(TicketStatus::Booked),
            "checkedIn" => Ok(TicketStatus::CheckedIn),
            "cancelled" => Ok(TicketStatus::Cancelled),
            other => Err(ParseTicketStatusError(other.to_string())),
        }
    }
}

/// Seat assignment attached to a ticket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    pub seat_code: String,
}

/// A sold or reserved seat on a flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub ticket_id: i64,
    pub flight_id: i64,
    pub seat: Seat,
    /// Minor currency units
    pub price: i32,
    pub flight_class: FlightClass,
    pub status: TicketStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_round_trip() {
        for class in [
            FlightClass::Economy,
            FlightClass::Business,
            FlightClass::FirstClass,
        ] {
            let parsed: FlightClass = class.to_string().parse().expect("round trip");
            assert_eq!(parsed, class);
        }
    }

    #[test]
    fn test_ticket_status_round_trip() {
        for status in [
            TicketStatus::Active,
            TicketStatus::Booked,
            TicketStatus::CheckedIn,
            TicketStatus::Cancelled,
        ] {
            let parsed: TicketStatus = status.to_string().parse().expect("round trip");
            assert_eq!(parsed, status);
        }
    }
}
