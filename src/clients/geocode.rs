use super::{FetchError, Geocoder, get_json, parse_base_url, require_key};
use crate::config::ProviderConfig;
use crate::models::GeocodedPlace;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

const SERVICE: &str = "Google Geocoding";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

pub struct GoogleGeocoder {
    client: Client,
    config: ProviderConfig,
}

impl GoogleGeocoder {
    #[must_use]
    pub const fn with_shared_client(client: Client, config: ProviderConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait::async_trait]
impl Geocoder for GoogleGeocoder {
    async fn geocode(&self, query: &str) -> Result<GeocodedPlace, FetchError> {
        let key = require_key(SERVICE, self.config.api_key.as_deref())?;
        let mut url = parse_base_url(SERVICE, &self.config.base_url)?;
        url.query_pairs_mut()
            .append_pair("address", query)
            .append_pair("key", key);

        debug!(query, "Geocoding location");
        let body: GeocodeResponse = get_json(SERVICE, self.client.get(url)).await?;
        first_place(query, body)
    }
}

fn first_place(query: &str, body: GeocodeResponse) -> Result<GeocodedPlace, FetchError> {
    match body.status.as_str() {
        "OK" => body
            .results
            .into_iter()
            .next()
            .map(|r| GeocodedPlace {
                formatted_query: r.formatted_address,
                latitude: r.geometry.location.lat,
                longitude: r.geometry.location.lng,
            })
            .ok_or_else(|| FetchError::NoResults {
                service: SERVICE,
                query: query.to_string(),
            }),
        "ZERO_RESULTS" => Err(FetchError::NoResults {
            service: SERVICE,
            query: query.to_string(),
        }),
        other => Err(FetchError::malformed(
            SERVICE,
            format!(
                "status {other}: {}",
                body.error_message.unwrap_or_default()
            ),
        )),
    }
}
