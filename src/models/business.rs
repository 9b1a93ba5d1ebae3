use super::{CachedRecord, Resource, ResourceKind};
use crate::entities::yelps;
use sea_orm::Set;
use serde::Serialize;

/// A business listing near a location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Business {
    pub name: String,
    pub image_url: Option<String>,
    pub price: Option<String>,
    pub rating: Option<f64>,
    pub url: Option<String>,
    pub created_at: i64,
}

impl Resource for Business {
    const KIND: ResourceKind = ResourceKind::Business;
}

impl CachedRecord for Business {
    type Entity = yelps::Entity;
    type Model = yelps::Model;
    type ActiveModel = yelps::ActiveModel;

    fn id_column() -> yelps::Column {
        yelps::Column::Id
    }

    fn location_column() -> yelps::Column {
        yelps::Column::LocationId
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }

    fn from_model(m: yelps::Model) -> Self {
        Self {
            name: m.name,
            image_url: m.image_url,
            price: m.price,
            rating: m.rating,
            url: m.url,
            created_at: m.created_at,
        }
    }

    fn to_active_model(&self, location_id: i32) -> yelps::ActiveModel {
        yelps::ActiveModel {
            name: Set(self.name.clone()),
            image_url: Set(self.image_url.clone()),
            price: Set(self.price.clone()),
            rating: Set(self.rating),
            url: Set(self.url.clone()),
            created_at: Set(self.created_at),
            location_id: Set(location_id),
            ..Default::default()
        }
    }
}
