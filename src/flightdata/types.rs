//! Raw provider wire shapes. Dates and times arrive in the provider's
//! compact numeric formats (`YYYYMMDD`, `HHMM`) and are only decoded by the
//! adapter.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct FlightEntry {
    pub time: FlightTimes,
    pub airport: AirportPair,
    pub aircraft: Aircraft,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct FlightTimes {
    #[serde(default)]
    pub scheduled: Option<TimeFields>,
    #[serde(default)]
    pub real: Option<TimeFields>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TimeFields {
    pub departure_date: Option<String>,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AirportPair {
    pub origin: AirportRef,
    pub destination: AirportRef,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AirportRef {
    pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Aircraft {
    pub registration: Option<String>,
    #[serde(default)]
    pub model: Option<AircraftModel>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AircraftModel {
    pub code: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AirportRecord {
    pub name: String,
    pub code: AirportCodes,
    #[serde(rename = "delayIndex")]
    pub delay_index: DelayIndex,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AirportCodes {
    pub icao: String,
    pub iata: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DelayIndex {
    pub arrivals: Option<f64>,
    pub departures: Option<f64>,
}
