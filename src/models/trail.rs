use super::{CachedRecord, Resource, ResourceKind};
use crate::entities::trails;
use sea_orm::Set;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trail {
    pub name: String,
    pub location: String,
    pub length: f64,
    pub stars: f64,
    pub star_votes: i32,
    pub summary: String,
    pub trail_url: String,
    pub conditions: Option<String>,
    pub condition_date: Option<String>,
    pub condition_time: Option<String>,
    pub created_at: i64,
}

impl Resource for Trail {
    const KIND: ResourceKind = ResourceKind::Trail;
}

impl CachedRecord for Trail {
    type Entity = trails::Entity;
    type Model = trails::Model;
    type ActiveModel = trails::ActiveModel;

    fn id_column() -> trails::Column {
        trails::Column::Id
    }

    fn location_column() -> trails::Column {
        trails::Column::LocationId
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }

    fn from_model(m: trails::Model) -> Self {
        Self {
            name: m.name,
            location: m.location,
            length: m.length,
            stars: m.stars,
            star_votes: m.star_votes,
            summary: m.summary,
            trail_url: m.trail_url,
            conditions: m.conditions,
            condition_date: m.condition_date,
            condition_time: m.condition_time,
            created_at: m.created_at,
        }
    }

    fn to_active_model(&self, location_id: i32) -> trails::ActiveModel {
        trails::ActiveModel {
            name: Set(self.name.clone()),
            location: Set(self.location.clone()),
            length: Set(self.length),
            stars: Set(self.stars),
            star_votes: Set(self.star_votes),
            summary: Set(self.summary.clone()),
            trail_url: Set(self.trail_url.clone()),
            conditions: Set(self.conditions.clone()),
            condition_date: Set(self.condition_date.clone()),
            condition_time: Set(self.condition_time.clone()),
            created_at: Set(self.created_at),
            location_id: Set(location_id),
            ..Default::default()
        }
    }
}
