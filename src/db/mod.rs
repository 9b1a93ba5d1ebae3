use crate::models::{CachedRecord, Location, NewLocation};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

pub mod migrator;
pub mod repositories;

/// Failure of a read or write against the relational store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

/// Handle to the one long-lived database connection shared by every request.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 1, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn location_repo(&self) -> repositories::location::LocationRepository {
        repositories::location::LocationRepository::new(self.conn.clone())
    }

    fn record_repo(&self) -> repositories::records::RecordRepository {
        repositories::records::RecordRepository::new(self.conn.clone())
    }

    pub async fn find_location_by_query(
        &self,
        search_query: &str,
    ) -> Result<Option<Location>, StoreError> {
        self.location_repo().find_by_query(search_query).await
    }

    pub async fn get_location(&self, id: i32) -> Result<Option<Location>, StoreError> {
        self.location_repo().get(id).await
    }

    pub async fn insert_location(&self, location: &NewLocation) -> Result<Option<i32>, StoreError> {
        self.location_repo().insert_ignore_conflict(location).await
    }

    pub async fn query_records<R: CachedRecord>(
        &self,
        location_id: i32,
    ) -> Result<Vec<R>, StoreError> {
        self.record_repo().query(location_id).await
    }

    pub async fn save_records<R: CachedRecord>(
        &self,
        records: &[R],
        location_id: i32,
    ) -> Result<u64, StoreError> {
        self.record_repo().save(records, location_id).await
    }

    pub async fn delete_records_by_location_id<R: CachedRecord>(
        &self,
        location_id: i32,
    ) -> Result<u64, StoreError> {
        self.record_repo().delete_by_location_id::<R>(location_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeocodedPlace, ResourceKind, Trail, Weather};

    async fn memory_store() -> Store {
        Store::new("sqlite::memory:").await.unwrap()
    }

    fn seattle() -> NewLocation {
        NewLocation::new(
            "seattle",
            GeocodedPlace {
                formatted_query: "Seattle, WA, USA".to_string(),
                latitude: 47.606_209,
                longitude: -122.332_071,
            },
            1_000,
        )
    }

    fn weather(forecast: &str, created_at: i64) -> Weather {
        Weather {
            forecast: forecast.to_string(),
            time: "Mon Jan 01 2024".to_string(),
            created_at,
        }
    }

    #[tokio::test]
    async fn location_insert_ignores_duplicate_query() {
        let store = memory_store().await;

        let first = store.insert_location(&seattle()).await.unwrap();
        assert!(first.is_some());

        let second = store.insert_location(&seattle()).await.unwrap();
        assert_eq!(second, None);

        let stored = store.find_location_by_query("seattle").await.unwrap().unwrap();
        assert_eq!(Some(stored.id), first);
        assert_eq!(stored.formatted_query, "Seattle, WA, USA");
    }

    #[tokio::test]
    async fn location_round_trips_by_id() {
        let store = memory_store().await;
        let id = store.insert_location(&seattle()).await.unwrap().unwrap();

        let stored = store.get_location(id).await.unwrap().unwrap();
        assert_eq!(stored, seattle().with_id(id));

        assert!(store.get_location(id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn query_returns_rows_in_insert_order() {
        let store = memory_store().await;
        let id = store.insert_location(&seattle()).await.unwrap().unwrap();

        store
            .save_records(&[weather("Rain", 1), weather("Clouds", 2)], id)
            .await
            .unwrap();
        store.save_records(&[weather("Sun", 3)], id).await.unwrap();

        let rows: Vec<Weather> = store.query_records(id).await.unwrap();
        let forecasts: Vec<_> = rows.iter().map(|w| w.forecast.as_str()).collect();
        assert_eq!(forecasts, vec!["Rain", "Clouds", "Sun"]);
    }

    #[tokio::test]
    async fn delete_then_query_is_empty() {
        let store = memory_store().await;
        let id = store.insert_location(&seattle()).await.unwrap().unwrap();
        store.save_records(&[weather("Rain", 1)], id).await.unwrap();

        let removed = store
            .delete_records_by_location_id::<Weather>(id)
            .await
            .unwrap();
        assert_eq!(removed, 1);

        let rows: Vec<Weather> = store.query_records(id).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn tables_are_partitioned_by_kind() {
        let store = memory_store().await;
        let id = store.insert_location(&seattle()).await.unwrap().unwrap();
        store.save_records(&[weather("Rain", 1)], id).await.unwrap();

        let trails: Vec<Trail> = store.query_records(id).await.unwrap();
        assert!(trails.is_empty());

        store.delete_records_by_location_id::<Trail>(id).await.unwrap();
        let rows: Vec<Weather> = store.query_records(id).await.unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn every_cached_kind_gets_a_location_index() {
        let store = memory_store().await;
        let backend = store.conn.get_database_backend();
        let rows = store
            .conn
            .query_all(Statement::from_string(
                backend,
                "SELECT name FROM sqlite_master WHERE type = 'index'".to_string(),
            ))
            .await
            .unwrap();
        let names: Vec<String> = rows
            .iter()
            .map(|row| row.try_get::<String>("", "name").unwrap())
            .collect();

        let tables: Vec<_> = ResourceKind::ALL
            .into_iter()
            .filter_map(ResourceKind::table_name)
            .collect();
        assert_eq!(tables, vec!["weathers", "yelps", "meetups", "trails"]);
        for table in tables {
            let index = format!("idx_{table}_location_id");
            assert!(names.contains(&index), "missing {index}");
        }
    }

    #[tokio::test]
    async fn saving_nothing_writes_nothing() {
        let store = memory_store().await;
        let written = store.save_records::<Weather>(&[], 1).await.unwrap();
        assert_eq!(written, 0);
    }
}
