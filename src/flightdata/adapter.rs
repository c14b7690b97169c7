//! Translation from the provider's wire shapes to the normalized structs the
//! dialog renders. Missing fields and malformed compact values all map to
//! `LookupError::NotFound`: the user cannot tell a broken record from no
//! record, and neither should the dialog.

use chrono::{NaiveDate, NaiveTime};

use super::types::{AirportRecord, FlightEntry, TimeFields};
use super::LookupError;
use crate::models::{AirportDetails, FlightDetails};

/// A by-date lookup reads the scheduled times and carries no aircraft model.
pub fn flight_from_scheduled(entry: &FlightEntry) -> Result<FlightDetails, LookupError> {
    let times = entry.time.scheduled.as_ref().ok_or(LookupError::NotFound)?;
    flight_details(entry, times, None)
}

/// A history lookup reads the real times and the aircraft model code.
pub fn flight_from_real(entry: &FlightEntry) -> Result<FlightDetails, LookupError> {
    let times = entry.time.real.as_ref().ok_or(LookupError::NotFound)?;
    let model = entry.aircraft.model.as_ref().map(|m| m.code.clone());
    flight_details(entry, times, model)
}

pub fn airport_details(record: &AirportRecord) -> AirportDetails {
    AirportDetails {
        name: record.name.clone(),
        icao: record.code.icao.clone(),
        iata: record.code.iata.clone(),
        arrival_delay_index: record.delay_index.arrivals.unwrap_or(0.0),
        departure_delay_index: record.delay_index.departures.unwrap_or(0.0),
    }
}

fn flight_details(
    entry: &FlightEntry,
    times: &TimeFields,
    model: Option<String>,
) -> Result<FlightDetails, LookupError> {
    let departure_date = parse_compact_date(times.departure_date.as_deref())?;
    let departure_time = parse_compact_time(times.departure_time.as_deref())?;
    let arrival_time = parse_compact_time(times.arrival_time.as_deref())?;
    let registration = entry
        .aircraft
        .registration
        .clone()
        .ok_or(LookupError::NotFound)?;

    Ok(FlightDetails {
        departure_date,
        departure_time,
        arrival_time,
        origin: entry.airport.origin.name.clone(),
        destination: entry.airport.destination.name.clone(),
        registration,
        model,
    })
}

fn parse_compact_date(value: Option<&str>) -> Result<NaiveDate, LookupError> {
    let value = value.ok_or(LookupError::NotFound)?;
    NaiveDate::parse_from_str(value, "%Y%m%d").map_err(|_| LookupError::NotFound)
}

fn parse_compact_time(value: Option<&str>) -> Result<NaiveTime, LookupError> {
    let value = value.ok_or(LookupError::NotFound)?;
    NaiveTime::parse_from_str(value, "%H%M").map_err(|_| LookupError::NotFound)
}
