use super::{CachedRecord, Resource, ResourceKind};
use crate::entities::meetups;
use sea_orm::Set;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meetup {
    pub link: String,
    pub name: String,
    pub creation_date: String,
    pub host: String,
    pub created_at: i64,
}

impl Resource for Meetup {
    const KIND: ResourceKind = ResourceKind::Meetup;
}

impl CachedRecord for Meetup {
    type Entity = meetups::Entity;
    type Model = meetups::Model;
    type ActiveModel = meetups::ActiveModel;

    fn id_column() -> meetups::Column {
        meetups::Column::Id
    }

    fn location_column() -> meetups::Column {
        meetups::Column::LocationId
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }

    fn from_model(m: meetups::Model) -> Self {
        Self {
            link: m.link,
            name: m.name,
            creation_date: m.creation_date,
            host: m.host,
            created_at: m.created_at,
        }
    }

    fn to_active_model(&self, location_id: i32) -> meetups::ActiveModel {
        meetups::ActiveModel {
            link: Set(self.link.clone()),
            name: Set(self.name.clone()),
            creation_date: Set(self.creation_date.clone()),
            host: Set(self.host.clone()),
            created_at: Set(self.created_at),
            location_id: Set(location_id),
            ..Default::default()
        }
    }
}
