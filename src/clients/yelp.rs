use super::{FetchError, Provider, get_json, parse_base_url, require_key};
use crate::config::ProviderConfig;
use crate::models::{Business, Location, now_millis};
use reqwest::Client;
use serde::Deserialize;

const SERVICE: &str = "Yelp";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    businesses: Vec<YelpBusiness>,
}

#[derive(Debug, Deserialize)]
struct YelpBusiness {
    name: String,
    image_url: Option<String>,
    price: Option<String>,
    rating: Option<f64>,
    url: Option<String>,
}

pub struct YelpClient {
    client: Client,
    config: ProviderConfig,
}

impl YelpClient {
    #[must_use]
    pub const fn with_shared_client(client: Client, config: ProviderConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait::async_trait]
impl Provider<Business> for YelpClient {
    async fn fetch(&self, location: &Location) -> Result<Vec<Business>, FetchError> {
        let key = require_key(SERVICE, self.config.api_key.as_deref())?;
        let mut url = parse_base_url(SERVICE, &self.config.base_url)?;
        url.query_pairs_mut()
            .append_pair("latitude", &location.latitude.to_string())
            .append_pair("longitude", &location.longitude.to_string());

        let body: SearchResponse = get_json(SERVICE, self.client.get(url).bearer_auth(key)).await?;
        Ok(to_businesses(body, now_millis()))
    }
}

fn to_businesses(body: SearchResponse, fetched_at: i64) -> Vec<Business> {
    body.businesses
        .into_iter()
        .map(|b| Business {
            name: b.name,
            image_url: b.image_url.filter(|u| !u.is_empty()),
            price: b.price,
            rating: b.rating,
            url: b.url,
            created_at: fetched_at,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_listing_fields() {
        let body: SearchResponse = serde_json::from_str(
            r#"{
                "total": 2,
                "businesses": [
                    {
                        "name": "Pike Place Chowder",
                        "image_url": "https://s3-media.example/chowder.jpg",
                        "price": "$$",
                        "rating": 4.5,
                        "url": "https://www.yelp.com/biz/pike-place-chowder"
                    },
                    { "name": "No Frills Diner", "image_url": "", "rating": 3.0 }
                ]
            }"#,
        )
        .unwrap();

        let listings = to_businesses(body, 7);
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].name, "Pike Place Chowder");
        assert_eq!(listings[0].price.as_deref(), Some("$$"));
        assert_eq!(listings[0].rating, Some(4.5));
        assert_eq!(listings[1].image_url, None);
        assert_eq!(listings[1].url, None);
    }
}
