use super::{CachedRecord, Resource, ResourceKind};
use crate::entities::weathers;
use sea_orm::Set;
use serde::Serialize;

/// One day of forecast summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Weather {
    pub forecast: String,
    pub time: String,
    pub created_at: i64,
}

impl Resource for Weather {
    const KIND: ResourceKind = ResourceKind::Weather;
}

impl CachedRecord for Weather {
    type Entity = weathers::Entity;
    type Model = weathers::Model;
    type ActiveModel = weathers::ActiveModel;

    fn id_column() -> weathers::Column {
        weathers::Column::Id
    }

    fn location_column() -> weathers::Column {
        weathers::Column::LocationId
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }

    fn from_model(m: weathers::Model) -> Self {
        Self {
            forecast: m.forecast,
            time: m.time,
            created_at: m.created_at,
        }
    }

    fn to_active_model(&self, location_id: i32) -> weathers::ActiveModel {
        weathers::ActiveModel {
            forecast: Set(self.forecast.clone()),
            time: Set(self.time.clone()),
            created_at: Set(self.created_at),
            location_id: Set(location_id),
            ..Default::default()
        }
    }
}
