use super::ServiceError;
use crate::clients::Geocoder;
use crate::db::Store;
use crate::models::{Location, NewLocation, now_millis};
use std::sync::Arc;
use tracing::{debug, info};

/// Turns free-text searches into canonical stored locations.
pub struct LocationService {
    store: Store,
    geocoder: Arc<dyn Geocoder>,
}

impl LocationService {
    #[must_use]
    pub fn new(store: Store, geocoder: Arc<dyn Geocoder>) -> Self {
        Self { store, geocoder }
    }

    /// Stored location for `query`, geocoding and storing it on first sight.
    /// Locations never expire.
    pub async fn resolve(&self, query: &str) -> Result<Location, ServiceError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ServiceError::InvalidQuery(
                "location search text is empty".to_string(),
            ));
        }

        if let Some(existing) = self.store.find_location_by_query(query).await? {
            debug!(id = existing.id, query, "Location already stored");
            return Ok(existing);
        }

        let place = self.geocoder.geocode(query).await?;
        let location = NewLocation::new(query, place, now_millis());

        match self.store.insert_location(&location).await? {
            Some(id) => {
                info!(id, query, formatted = %location.formatted_query, "Stored new location");
                Ok(location.with_id(id))
            }
            // Another request stored the same query between our read and insert.
            None => self
                .store
                .find_location_by_query(query)
                .await?
                .ok_or_else(|| ServiceError::LocationConflict(query.to_string())),
        }
    }

    /// The stored row for a location id previously handed out by
    /// [`resolve`](Self::resolve). Client-supplied fields other than the id
    /// are never trusted.
    pub async fn stored(&self, id: i32) -> Result<Location, ServiceError> {
        self.store
            .get_location(id)
            .await?
            .ok_or(ServiceError::UnknownLocation(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::FetchError;
    use crate::models::GeocodedPlace;
    use crate::services::testing::{CountingGeocoder, memory_store, seattle_place};

    #[tokio::test]
    async fn resolve_is_idempotent() {
        let store = memory_store().await;
        let geocoder = Arc::new(CountingGeocoder::returning(seattle_place()));
        let service = LocationService::new(store, geocoder.clone());

        let first = service.resolve("seattle").await.unwrap();
        let second = service.resolve("seattle").await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.formatted_query, "Seattle, WA, USA");
        assert_eq!(geocoder.calls(), 1);
    }

    #[tokio::test]
    async fn distinct_queries_get_distinct_rows() {
        let store = memory_store().await;
        let geocoder = Arc::new(CountingGeocoder::returning(seattle_place()));
        let service = LocationService::new(store, geocoder.clone());

        let a = service.resolve("seattle").await.unwrap();
        let b = service.resolve("Seattle, WA").await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(geocoder.calls(), 2);
    }

    /// Stores the same query itself while "geocoding", like a concurrent
    /// request finishing first.
    struct RacingGeocoder {
        store: Store,
    }

    #[async_trait::async_trait]
    impl Geocoder for RacingGeocoder {
        async fn geocode(&self, query: &str) -> Result<GeocodedPlace, FetchError> {
            self.store
                .insert_location(&NewLocation::new(query, seattle_place(), 1))
                .await
                .unwrap();
            Ok(seattle_place())
        }
    }

    #[tokio::test]
    async fn row_inserted_by_a_racing_request_is_returned() {
        let store = memory_store().await;
        let service = LocationService::new(
            store.clone(),
            Arc::new(RacingGeocoder {
                store: store.clone(),
            }),
        );

        let resolved = service.resolve("seattle").await.unwrap();

        let stored = store.find_location_by_query("seattle").await.unwrap().unwrap();
        assert_eq!(resolved.id, stored.id);
        assert_eq!(resolved.created_at, 1);
    }

    #[tokio::test]
    async fn geocoder_failure_stores_nothing() {
        let store = memory_store().await;
        let service = LocationService::new(store.clone(), Arc::new(CountingGeocoder::failing()));

        let err = service.resolve("atlantis").await.unwrap_err();
        assert!(matches!(err, ServiceError::Fetch(_)));
        assert!(store.find_location_by_query("atlantis").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn blank_query_is_rejected_before_geocoding() {
        let store = memory_store().await;
        let geocoder = Arc::new(CountingGeocoder::returning(seattle_place()));
        let service = LocationService::new(store, geocoder.clone());

        let err = service.resolve("   ").await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidQuery(_)));
        assert_eq!(geocoder.calls(), 0);
    }

    #[tokio::test]
    async fn stored_returns_the_canonical_row() {
        let store = memory_store().await;
        let service = LocationService::new(
            store,
            Arc::new(CountingGeocoder::returning(seattle_place())),
        );
        let resolved = service.resolve("seattle").await.unwrap();

        assert_eq!(service.stored(resolved.id).await.unwrap(), resolved);

        let err = service.stored(resolved.id + 1).await.unwrap_err();
        assert!(matches!(err, ServiceError::UnknownLocation(id) if id == resolved.id + 1));
    }
}
