use super::{FetchError, Provider, get_json, parse_base_url, require_key};
use crate::config::ProviderConfig;
use crate::constants::providers::TMDB_IMAGE_BASE;
use crate::models::{Location, Movie};
use reqwest::Client;
use serde::Deserialize;

const SERVICE: &str = "TheMovieDB";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<TmdbMovie>,
}

#[derive(Debug, Deserialize)]
struct TmdbMovie {
    title: String,
    #[serde(default)]
    overview: String,
    #[serde(default)]
    vote_average: f64,
    #[serde(default)]
    vote_count: i64,
    poster_path: Option<String>,
    #[serde(default)]
    popularity: f64,
    release_date: Option<String>,
}

pub struct MovieDbClient {
    client: Client,
    config: ProviderConfig,
}

impl MovieDbClient {
    #[must_use]
    pub const fn with_shared_client(client: Client, config: ProviderConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait::async_trait]
impl Provider<Movie> for MovieDbClient {
    async fn fetch(&self, location: &Location) -> Result<Vec<Movie>, FetchError> {
        let key = require_key(SERVICE, self.config.api_key.as_deref())?;
        let query = search_text(location);
        let mut url = parse_base_url(SERVICE, &self.config.base_url)?;
        url.query_pairs_mut()
            .append_pair("api_key", key)
            .append_pair("language", "en-US")
            .append_pair("page", "1")
            .append_pair("query", query);

        let body: SearchResponse = get_json(SERVICE, self.client.get(url)).await?;
        Ok(body.results.into_iter().map(to_movie).collect())
    }
}

/// Movies are searched by the city name the user typed; fall back to the
/// first part of the formatted address when that is missing.
fn search_text(location: &Location) -> &str {
    let typed = location.search_query.trim();
    if typed.is_empty() {
        location
            .formatted_query
            .split(',')
            .next()
            .unwrap_or_default()
            .trim()
    } else {
        typed
    }
}

fn to_movie(m: TmdbMovie) -> Movie {
    Movie {
        title: m.title,
        overview: m.overview,
        average_votes: m.vote_average,
        total_votes: m.vote_count,
        image_url: m.poster_path.map(|p| format!("{TMDB_IMAGE_BASE}{p}")),
        popularity: m.popularity,
        released_on: m.release_date.filter(|d| !d.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(search_query: &str, formatted_query: &str) -> Location {
        Location {
            id: 1,
            search_query: search_query.to_string(),
            formatted_query: formatted_query.to_string(),
            latitude: 0.0,
            longitude: 0.0,
            created_at: 0,
        }
    }

    #[test]
    fn poster_path_becomes_full_url() {
        let body: SearchResponse = serde_json::from_str(
            r#"{
                "page": 1,
                "results": [
                    {
                        "title": "Sleepless in Seattle",
                        "overview": "A widowed architect...",
                        "vote_average": 6.6,
                        "vote_count": 2004,
                        "poster_path": "/iLWsLVrfkFvOXOG9PbUAYg7AK3E.jpg",
                        "popularity": 11.2,
                        "release_date": "1993-06-24"
                    },
                    { "title": "Untitled Seattle Project", "release_date": "" }
                ]
            }"#,
        )
        .unwrap();

        let movies: Vec<Movie> = body.results.into_iter().map(to_movie).collect();
        assert_eq!(
            movies[0].image_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/iLWsLVrfkFvOXOG9PbUAYg7AK3E.jpg")
        );
        assert_eq!(movies[0].total_votes, 2004);
        assert_eq!(movies[0].released_on.as_deref(), Some("1993-06-24"));
        assert_eq!(movies[1].image_url, None);
        assert_eq!(movies[1].released_on, None);
    }

    #[test]
    fn searches_by_typed_query_then_city() {
        assert_eq!(search_text(&location("seattle", "Seattle, WA, USA")), "seattle");
        assert_eq!(search_text(&location("  ", "Seattle, WA, USA")), "Seattle");
    }
}
