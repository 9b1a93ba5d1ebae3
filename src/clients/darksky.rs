use super::{FetchError, Provider, display_date, get_json, parse_base_url, require_key};
use crate::config::ProviderConfig;
use crate::models::{Location, Weather, now_millis};
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;

const SERVICE: &str = "Dark Sky";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: DailyBlock,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    #[serde(default)]
    data: Vec<DailyForecast>,
}

#[derive(Debug, Deserialize)]
struct DailyForecast {
    /// Seconds since the Unix epoch.
    time: i64,
    summary: Option<String>,
}

pub struct DarkSkyClient {
    client: Client,
    config: ProviderConfig,
}

impl DarkSkyClient {
    #[must_use]
    pub const fn with_shared_client(client: Client, config: ProviderConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait::async_trait]
impl Provider<Weather> for DarkSkyClient {
    async fn fetch(&self, location: &Location) -> Result<Vec<Weather>, FetchError> {
        let key = require_key(SERVICE, self.config.api_key.as_deref())?;
        let mut url = parse_base_url(SERVICE, &self.config.base_url)?;
        url.path_segments_mut()
            .map_err(|()| FetchError::malformed(SERVICE, "base URL cannot carry a path"))?
            .pop_if_empty()
            .push(key)
            .push(&format!("{},{}", location.latitude, location.longitude));

        let body: ForecastResponse = get_json(SERVICE, self.client.get(url)).await?;
        Ok(to_weather(body, now_millis()))
    }
}

fn to_weather(body: ForecastResponse, fetched_at: i64) -> Vec<Weather> {
    body.daily
        .data
        .into_iter()
        .map(|day| Weather {
            forecast: day.summary.unwrap_or_default(),
            time: DateTime::from_timestamp(day.time, 0)
                .map(display_date)
                .unwrap_or_default(),
            created_at: fetched_at,
        })
        .collect()
}
