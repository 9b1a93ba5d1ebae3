use super::{FetchError, Provider, display_date, get_json, parse_base_url, require_key};
use crate::config::ProviderConfig;
use crate::models::{Location, Meetup, now_millis};
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;

const SERVICE: &str = "Meetup";

#[derive(Debug, Deserialize)]
struct UpcomingEvents {
    #[serde(default)]
    events: Vec<MeetupEvent>,
}

#[derive(Debug, Deserialize)]
struct MeetupEvent {
    link: String,
    name: String,
    /// Milliseconds since the Unix epoch.
    created: i64,
    group: MeetupGroup,
}

#[derive(Debug, Deserialize)]
struct MeetupGroup {
    name: String,
}

pub struct MeetupClient {
    client: Client,
    config: ProviderConfig,
}

impl MeetupClient {
    #[must_use]
    pub const fn with_shared_client(client: Client, config: ProviderConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait::async_trait]
impl Provider<Meetup> for MeetupClient {
    async fn fetch(&self, location: &Location) -> Result<Vec<Meetup>, FetchError> {
        let key = require_key(SERVICE, self.config.api_key.as_deref())?;
        let mut url = parse_base_url(SERVICE, &self.config.base_url)?;
        url.query_pairs_mut()
            .append_pair("lat", &location.latitude.to_string())
            .append_pair("lon", &location.longitude.to_string())
            .append_pair("key", key)
            .append_pair("sign", "true");

        let body: UpcomingEvents = get_json(SERVICE, self.client.get(url)).await?;
        Ok(to_meetups(body, now_millis()))
    }
}

fn to_meetups(body: UpcomingEvents, fetched_at: i64) -> Vec<Meetup> {
    body.events
        .into_iter()
        .map(|e| Meetup {
            link: e.link,
            name: e.name,
            creation_date: DateTime::from_timestamp_millis(e.created)
                .map(display_date)
                .unwrap_or_default(),
            host: e.group.name,
            created_at: fetched_at,
        })
        .collect()
}
