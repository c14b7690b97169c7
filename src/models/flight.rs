use chrono::{NaiveDate, NaiveTime};

/// Normalized flight data as the dialog needs it. `model` is only filled in
/// by the history lookup; the by-date schedule does not carry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightDetails {
    pub departure_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub arrival_time: NaiveTime,
    pub origin: String,
    pub destination: String,
    pub registration: String,
    pub model: Option<String>,
}

impl FlightDetails {
    /// One-line rendering stored in the saved-flight blob. Must not contain
    /// the record separator `"; "`.
    pub fn summary(&self) -> String {
        format!(
            "{} dep {} arr {}, {} to {}, aircraft {}",
            self.departure_date.format("%d.%m.%Y"),
            self.departure_time.format("%H:%M"),
            self.arrival_time.format("%H:%M"),
            self.origin,
            self.destination,
            self.registration,
        )
    }

    /// Rendering for the "Flight Info" screen (latest known route).
    pub fn render_latest(&self, flight_number: &str) -> String {
        format!(
            "Latest route for flight {}:\n\
             🗓 Date: {}\n\
             🛫 Departure: {}   🛬 Arrival: {}\n\
             🛫 From {}\n\
             🛬 To {}\n\
             ✈️ Aircraft: {} reg. {}",
            flight_number,
            self.departure_date.format("%d.%m.%Y"),
            self.departure_time.format("%H:%M"),
            self.arrival_time.format("%H:%M"),
            self.origin,
            self.destination,
            self.model.as_deref().unwrap_or("unknown"),
            self.registration,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AirportDetails {
    pub name: String,
    pub icao: String,
    pub iata: String,
    pub arrival_delay_index: f64,
    pub departure_delay_index: f64,
}

impl AirportDetails {
    pub fn render(&self, query: &str) -> String {
        format!(
            "🛩 Airport information for {}:\n\
             Full name: {}\n\
             ICAO code: {}\n\
             IATA code: {}\n\
             ⏳ Arrival delay index: {}\n\
             ⏳ Departure delay index: {}",
            query,
            self.name,
            self.icao,
            self.iata,
            self.arrival_delay_index,
            self.departure_delay_index,
        )
    }
}
