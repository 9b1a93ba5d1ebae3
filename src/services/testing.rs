//! Doubles for the upstream providers and an in-memory store.

use crate::clients::{FetchError, Geocoder, Provider};
use crate::db::Store;
use crate::models::{Business, GeocodedPlace, Location, NewLocation, Weather};
use std::sync::atomic::{AtomicUsize, Ordering};

pub async fn memory_store() -> Store {
    Store::new("sqlite::memory:").await.unwrap()
}

/// A store holding one location, and that location's id.
pub async fn memory_store_with_location() -> (Store, i32) {
    let store = memory_store().await;
    let id = store
        .insert_location(&NewLocation::new("seattle", seattle_place(), 0))
        .await
        .unwrap()
        .unwrap();
    (store, id)
}

pub fn seattle_place() -> GeocodedPlace {
    GeocodedPlace {
        formatted_query: "Seattle, WA, USA".to_string(),
        latitude: 47.606_209,
        longitude: -122.332_071,
    }
}

pub fn location(id: i32) -> Location {
    NewLocation::new("seattle", seattle_place(), 0).with_id(id)
}

pub fn weather(forecast: &str, created_at: i64) -> Weather {
    Weather {
        forecast: forecast.to_string(),
        time: "Mon Jan 01 2024".to_string(),
        created_at,
    }
}

pub fn business(name: &str, created_at: i64) -> Business {
    Business {
        name: name.to_string(),
        image_url: None,
        price: Some("$$".to_string()),
        rating: Some(4.0),
        url: None,
        created_at,
    }
}

/// Returns canned records (or a failure) and counts how often it was asked.
pub struct CountingProvider<R> {
    records: Vec<R>,
    fail: bool,
    calls: AtomicUsize,
}

impl<R: Clone> CountingProvider<R> {
    pub fn returning(records: Vec<R>) -> Self {
        Self {
            records,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            records: Vec::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl<R: Clone + Send + Sync> Provider<R> for CountingProvider<R> {
    async fn fetch(&self, _location: &Location) -> Result<Vec<R>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(FetchError::malformed("test provider", "simulated outage"));
        }
        Ok(self.records.clone())
    }
}

pub struct CountingGeocoder {
    place: Option<GeocodedPlace>,
    calls: AtomicUsize,
}

impl CountingGeocoder {
    pub fn returning(place: GeocodedPlace) -> Self {
        Self {
            place: Some(place),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            place: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Geocoder for CountingGeocoder {
    async fn geocode(&self, query: &str) -> Result<GeocodedPlace, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.place.clone().ok_or_else(|| FetchError::NoResults {
            service: "test geocoder",
            query: query.to_string(),
        })
    }
}
