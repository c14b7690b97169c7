pub mod adapter;
pub mod types;

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use thiserror::Error;

use crate::models::{AirportDetails, FlightDetails};
use types::{AirportRecord, FlightEntry};

const RETRIES: u32 = 1;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const FLIGHTDATA_HOST_ENV: &str = "FLIGHTDATA_SERVICE_HOST";

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("no matching record")]
    NotFound,
    #[error("provider error: {0}")]
    Provider(String),
}

/// Seam to the external flight-data service. The dialog only ever sees the
/// normalized structs; tests substitute a scripted implementation.
#[async_trait]
pub trait FlightDataApi: Send + Sync {
    async fn lookup_by_date(
        &self,
        flight_number: &str,
        date: NaiveDate,
    ) -> Result<FlightDetails, LookupError>;

    /// Most recent historical entry for the flight number.
    async fn lookup_latest_by_number(
        &self,
        flight_number: &str,
    ) -> Result<FlightDetails, LookupError>;

    async fn lookup_airport(&self, identifier: &str) -> Result<AirportDetails, LookupError>;
}

/// HTTP client for the flight-data service, with bounded retry on transient
/// failures and a hard request deadline.
pub struct FlightDataClient {
    client: ClientWithMiddleware,
    host: String,
}

impl FlightDataClient {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let host = env::var(FLIGHTDATA_HOST_ENV)?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(RETRIES);
        let client = ClientBuilder::new(Client::builder().timeout(REQUEST_TIMEOUT).build()?)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self { client, host })
    }

    async fn fetch_json(&self, url: &str) -> Result<String, LookupError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| LookupError::Provider(e.to_string()))?;

        response
            .text()
            .await
            .map_err(|e| LookupError::Provider(e.to_string()))
    }

    async fn fetch_entries(&self, url: &str) -> Result<Vec<FlightEntry>, LookupError> {
        let text = self.fetch_json(url).await?;
        serde_json::from_str(&text).map_err(|e| LookupError::Provider(e.to_string()))
    }
}

#[async_trait]
impl FlightDataApi for FlightDataClient {
    async fn lookup_by_date(
        &self,
        flight_number: &str,
        date: NaiveDate,
    ) -> Result<FlightDetails, LookupError> {
        let url = format!(
            "{}/flights?number={}&date={}",
            self.host,
            flight_number,
            date.format("%Y%m%d"),
        );
        let entries = self.fetch_entries(&url).await?;
        let entry = entries.first().ok_or(LookupError::NotFound)?;
        adapter::flight_from_scheduled(entry)
    }

    async fn lookup_latest_by_number(
        &self,
        flight_number: &str,
    ) -> Result<FlightDetails, LookupError> {
        let url = format!("{}/flights/history?number={}", self.host, flight_number);
        let entries = self.fetch_entries(&url).await?;
        let entry = entries.last().ok_or(LookupError::NotFound)?;
        adapter::flight_from_real(entry)
    }

    async fn lookup_airport(&self, identifier: &str) -> Result<AirportDetails, LookupError> {
        let url = format!("{}/airports/{}", self.host, identifier);
        let text = self.fetch_json(&url).await?;
        let record: AirportRecord =
            serde_json::from_str(&text).map_err(|e| LookupError::Provider(e.to_string()))?;
        Ok(adapter::airport_details(&record))
    }
}
