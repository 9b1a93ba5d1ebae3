//! HTTP clients for the upstream data providers.
//!
//! Each client turns a provider response into the crate's normalized records
//! and is consumed by the services through [`Provider`] or [`Geocoder`], so
//! the services never see provider wire formats.

pub mod darksky;
pub mod geocode;
pub mod hiking;
pub mod meetup;
pub mod moviedb;
pub mod yelp;

pub use darksky::DarkSkyClient;
pub use geocode::GoogleGeocoder;
pub use hiking::HikingProjectClient;
pub use meetup::MeetupClient;
pub use moviedb::MovieDbClient;
pub use yelp::YelpClient;

use crate::models::{GeocodedPlace, Location};
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// An upstream provider call failed or returned data we cannot use.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{service} request failed: {source}")]
    Http {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} returned {status}: {body}")]
    Status {
        service: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("{service} returned an unusable response: {message}")]
    Malformed {
        service: &'static str,
        message: String,
    },

    #[error("{service} found no results for {query:?}")]
    NoResults { service: &'static str, query: String },

    #[error("no API key configured for {0}")]
    MissingApiKey(&'static str),
}

impl FetchError {
    pub fn malformed(service: &'static str, message: impl Into<String>) -> Self {
        Self::Malformed {
            service,
            message: message.into(),
        }
    }
}

/// Source of fresh records of one kind for a location.
#[async_trait::async_trait]
pub trait Provider<R>: Send + Sync {
    async fn fetch(&self, location: &Location) -> Result<Vec<R>, FetchError>;
}

/// Turns free text into a formatted address with coordinates.
#[async_trait::async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, query: &str) -> Result<GeocodedPlace, FetchError>;
}

/// Build the HTTP client shared by every provider so connections are pooled.
pub fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent(concat!("city-explorer/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

/// Calendar date in the short form the front end shows, e.g. "Mon Jan 01 2024".
pub(crate) fn display_date(at: DateTime<Utc>) -> String {
    at.format("%a %b %d %Y").to_string()
}

pub(crate) fn require_key<'a>(
    service: &'static str,
    key: Option<&'a str>,
) -> Result<&'a str, FetchError> {
    key.filter(|k| !k.is_empty())
        .ok_or(FetchError::MissingApiKey(service))
}

pub(crate) fn parse_base_url(service: &'static str, base: &str) -> Result<Url, FetchError> {
    Url::parse(base).map_err(|e| FetchError::malformed(service, format!("bad base URL: {e}")))
}

/// Send the request and decode a successful JSON body.
pub(crate) async fn get_json<T: DeserializeOwned>(
    service: &'static str,
    request: RequestBuilder,
) -> Result<T, FetchError> {
    let response = request
        .send()
        .await
        .map_err(|source| FetchError::Http { service, source })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| FetchError::Http { service, source })?;

    if !status.is_success() {
        return Err(FetchError::Status {
            service,
            status,
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| FetchError::malformed(service, e.to_string()))
}
