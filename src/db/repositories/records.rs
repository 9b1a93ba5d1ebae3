use crate::db::StoreError;
use crate::models::CachedRecord;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

/// Table-agnostic access to the per-location resource tables.
pub struct RecordRepository {
    conn: DatabaseConnection,
}

impl RecordRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// All rows for the location, oldest insert first.
    pub async fn query<R: CachedRecord>(&self, location_id: i32) -> Result<Vec<R>, StoreError> {
        let rows = R::Entity::find()
            .filter(R::location_column().eq(location_id))
            .order_by_asc(R::id_column())
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(R::from_model).collect())
    }

    /// Appends one row per record. Returns the number of rows written.
    pub async fn save<R: CachedRecord>(
        &self,
        records: &[R],
        location_id: i32,
    ) -> Result<u64, StoreError> {
        if records.is_empty() {
            return Ok(0);
        }

        let models: Vec<R::ActiveModel> = records
            .iter()
            .map(|r| r.to_active_model(location_id))
            .collect();

        let written = R::Entity::insert_many(models)
            .exec_without_returning(&self.conn)
            .await?;

        Ok(written)
    }

    pub async fn delete_by_location_id<R: CachedRecord>(
        &self,
        location_id: i32,
    ) -> Result<u64, StoreError> {
        let res = R::Entity::delete_many()
            .filter(R::location_column().eq(location_id))
            .exec(&self.conn)
            .await?;

        Ok(res.rows_affected)
    }
}
