use crate::entities::locations;
use serde::{Deserialize, Serialize};

/// A canonical, persisted location keyed by the text it was searched with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: i32,
    pub search_query: String,
    pub formatted_query: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: i64,
}

impl From<locations::Model> for Location {
    fn from(m: locations::Model) -> Self {
        Self {
            id: m.id,
            search_query: m.search_query,
            formatted_query: m.formatted_query,
            latitude: m.latitude,
            longitude: m.longitude,
            created_at: m.created_at,
        }
    }
}

/// What the geocoder knows about a free-text query.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedPlace {
    pub formatted_query: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A location that has been geocoded but not stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLocation {
    pub search_query: String,
    pub formatted_query: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: i64,
}

impl NewLocation {
    #[must_use]
    pub fn new(search_query: impl Into<String>, place: GeocodedPlace, created_at: i64) -> Self {
        Self {
            search_query: search_query.into(),
            formatted_query: place.formatted_query,
            latitude: place.latitude,
            longitude: place.longitude,
            created_at,
        }
    }

    #[must_use]
    pub fn with_id(self, id: i32) -> Location {
        Location {
            id,
            search_query: self.search_query,
            formatted_query: self.formatted_query,
            latitude: self.latitude,
            longitude: self.longitude,
            created_at: self.created_at,
        }
    }
}
