use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operational status of a flight
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FlightStatus {
    Scheduled,
    Departed,
    Landed,
    Delayed,
    Cancelled,
}

impl FlightStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlightStatus::Scheduled => "scheduled",
            FlightStatus::Departed => "departed",
            FlightStatus::Landed => "landed",
            FlightStatus::Delayed => "delayed",
            FlightStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown flight status: {0}")]
pub struct ParseFlightStatusError(String);

impl FromStr for FlightStatus {
    type Err = ParseFlightStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(FlightStatus::Scheduled),
            "departed" => Ok(FlightStatus::Departed),
            "landed" => Ok(FlightStatus::Landed),
            "delayed" => Ok(FlightStatus::Delayed),
            "cancelled" => Ok(FlightStatus::Cancelled),
            other => Err(ParseFlightStatusError(other.to_string())),
        }
    }
}

/// A scheduled flight as persisted by the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flight {
    pub flight_id: i64,
    pub flight_number: String,
    pub airline: String,
    pub aircraft_type: String,
    pub departure_city: String,
    pub arrival_city: String,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    /// Minor currency units
    pub base_price: i32,
    pub status: FlightStatus,
}

/// Creation fields for a flight; the store assigns the id
#[derive(Debug, Clone, Deserialize)]
pub struct NewFlight {
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
    pub status: FlightStatus,
}
