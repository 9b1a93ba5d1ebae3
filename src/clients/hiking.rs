use super::{FetchError, Provider, get_json, parse_base_url, require_key};
use crate::config::ProviderConfig;
use crate::constants::providers::TRAIL_MAX_DISTANCE;
use crate::models::{Location, Trail, now_millis};
use reqwest::Client;
use serde::Deserialize;

const SERVICE: &str = "Hiking Project";

/// Reported by the provider when a trail has no condition report.
const NO_CONDITION_DATE: &str = "1970-01-01 00:00:00";

#[derive(Debug, Deserialize)]
struct TrailsResponse {
    #[serde(default)]
    trails: Vec<HikingTrail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HikingTrail {
    name: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    length: f64,
    #[serde(default)]
    stars: f64,
    #[serde(default)]
    star_votes: i32,
    #[serde(default)]
    summary: String,
    url: String,
    condition_details: Option<String>,
    condition_date: Option<String>,
}

pub struct HikingProjectClient {
    client: Client,
    config: ProviderConfig,
}

impl HikingProjectClient {
    #[must_use]
    pub const fn with_shared_client(client: Client, config: ProviderConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait::async_trait]
impl Provider<Trail> for HikingProjectClient {
    async fn fetch(&self, location: &Location) -> Result<Vec<Trail>, FetchError> {
        let key = require_key(SERVICE, self.config.api_key.as_deref())?;
        let mut url = parse_base_url(SERVICE, &self.config.base_url)?;
        url.query_pairs_mut()
            .append_pair("lat", &location.latitude.to_string())
            .append_pair("lon", &location.longitude.to_string())
            .append_pair("maxDistance", &TRAIL_MAX_DISTANCE.to_string())
            .append_pair("key", key);

        let body: TrailsResponse = get_json(SERVICE, self.client.get(url)).await?;
        Ok(to_trails(body, now_millis()))
    }
}

fn to_trails(body: TrailsResponse, fetched_at: i64) -> Vec<Trail> {
    body.trails
        .into_iter()
        .map(|t| {
            let (condition_date, condition_time) = split_condition_date(t.condition_date);
            Trail {
                name: t.name,
                location: t.location,
                length: t.length,
                stars: t.stars,
                star_votes: t.star_votes,
                summary: t.summary,
                trail_url: t.url,
                conditions: t.condition_details,
                condition_date,
                condition_time,
                created_at: fetched_at,
            }
        })
        .collect()
}

fn split_condition_date(raw: Option<String>) -> (Option<String>, Option<String>) {
    match raw.as_deref() {
        None | Some("" | NO_CONDITION_DATE) => (None, None),
        Some(stamp) => match stamp.split_once(' ') {
            Some((date, time)) => (Some(date.to_string()), Some(time.to_string())),
            None => (Some(stamp.to_string()), None),
        },
    }
}
