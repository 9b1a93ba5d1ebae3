//! Plain record types served by the API, and the glue that ties each cached
//! record to its table.

pub mod business;
pub mod location;
pub mod meetup;
pub mod movie;
pub mod trail;
pub mod weather;

pub use business::Business;
pub use location::{GeocodedPlace, Location, NewLocation};
pub use meetup::Meetup;
pub use movie::Movie;
pub use trail::Trail;
pub use weather::Weather;

use crate::constants::freshness;
use chrono::Duration;
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Weather,
    Business,
    Movie,
    Meetup,
    Trail,
}

impl ResourceKind {
    pub const ALL: [Self; 5] = [
        Self::Weather,
        Self::Business,
        Self::Movie,
        Self::Meetup,
        Self::Trail,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weather => "weather",
            Self::Business => "business",
            Self::Movie => "movie",
            Self::Meetup => "meetup",
            Self::Trail => "trail",
        }
    }

    /// Table backing this kind, or `None` when results are never stored.
    #[must_use]
    pub const fn table_name(self) -> Option<&'static str> {
        match self {
            Self::Weather => Some("weathers"),
            Self::Business => Some("yelps"),
            Self::Meetup => Some("meetups"),
            Self::Trail => Some("trails"),
            Self::Movie => None,
        }
    }

    /// Maximum age of stored rows before they must be refetched.
    /// `None` means stored rows never go stale.
    #[must_use]
    pub fn freshness_threshold(self) -> Option<Duration> {
        match self {
            Self::Weather => Some(Duration::minutes(freshness::WEATHER_MINUTES)),
            Self::Business => Some(Duration::days(freshness::BUSINESS_DAYS)),
            Self::Meetup => Some(Duration::days(freshness::MEETUP_DAYS)),
            Self::Trail => Some(Duration::minutes(freshness::TRAIL_MINUTES)),
            Self::Movie => None,
        }
    }

    #[must_use]
    pub const fn is_cached(self) -> bool {
        self.table_name().is_some()
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized record produced by one of the upstream providers.
pub trait Resource: Serialize + Send + Sync + Sized + 'static {
    const KIND: ResourceKind;
}

/// A record persisted per location and served from the store while fresh.
pub trait CachedRecord: Resource + Clone {
    type Entity: EntityTrait<Model = Self::Model>;
    type Model: IntoActiveModel<Self::ActiveModel>;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity> + Send + 'static;

    fn id_column() -> <Self::Entity as EntityTrait>::Column;

    fn location_column() -> <Self::Entity as EntityTrait>::Column;

    /// Milliseconds since the Unix epoch at which the record was fetched.
    fn created_at(&self) -> i64;

    fn from_model(model: Self::Model) -> Self;

    fn to_active_model(&self, location_id: i32) -> Self::ActiveModel;
}

/// Current time in the unit stored in every `created_at` column.
#[must_use]
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
