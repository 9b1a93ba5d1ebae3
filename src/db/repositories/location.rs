use crate::db::StoreError;
use crate::entities::{locations, prelude::*};
use crate::models::{Location, NewLocation};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};
use tracing::debug;

pub struct LocationRepository {
    conn: DatabaseConnection,
}

impl LocationRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn find_by_query(&self, search_query: &str) -> Result<Option<Location>, StoreError> {
        let row = Locations::find()
            .filter(locations::Column::SearchQuery.eq(search_query))
            .one(&self.conn)
            .await?;

        Ok(row.map(Location::from))
    }

    pub async fn get(&self, id: i32) -> Result<Option<Location>, StoreError> {
        let row = Locations::find_by_id(id).one(&self.conn).await?;
        Ok(row.map(Location::from))
    }

    /// Inserts the location unless one with the same `search_query` exists.
    /// Returns the new id, or `None` when the insert hit that conflict.
    pub async fn insert_ignore_conflict(
        &self,
        location: &NewLocation,
    ) -> Result<Option<i32>, StoreError> {
        let active_model = locations::ActiveModel {
            search_query: Set(location.search_query.clone()),
            formatted_query: Set(location.formatted_query.clone()),
            latitude: Set(location.latitude),
            longitude: Set(location.longitude),
            created_at: Set(location.created_at),
            ..Default::default()
        };

        let result = Locations::insert(active_model)
            .on_conflict(
                OnConflict::column(locations::Column::SearchQuery)
                    .do_nothing()
                    .to_owned(),
            )
            .exec(&self.conn)
            .await;

        match result {
            Ok(res) => Ok(Some(res.last_insert_id)),
            Err(DbErr::RecordNotInserted) => {
                debug!(
                    search_query = %location.search_query,
                    "Location insert skipped, query already stored"
                );
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}
