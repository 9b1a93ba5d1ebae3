use super::{CacheLookup, CachePolicy, ServiceError};
use crate::clients::Provider;
use crate::db::Store;
use crate::models::{CachedRecord, Location, Resource};
use std::sync::Arc;
use tracing::debug;

/// Serves one resource kind for a location, from the store when fresh and
/// from the upstream provider otherwise.
pub struct ResourceService<R> {
    store: Store,
    cache: CachePolicy,
    provider: Arc<dyn Provider<R>>,
}

impl<R: Resource> ResourceService<R> {
    #[must_use]
    pub fn new(store: Store, provider: Arc<dyn Provider<R>>) -> Self {
        Self {
            cache: CachePolicy::new(store.clone()),
            store,
            provider,
        }
    }

    /// Ask the provider, bypassing the store entirely.
    pub async fn fetch_fresh(&self, location: &Location) -> Result<Vec<R>, ServiceError> {
        let records = self.provider.fetch(location).await?;
        debug!(
            kind = %R::KIND,
            location_id = location.id,
            count = records.len(),
            "Fetched from provider"
        );
        Ok(records)
    }
}

impl<R: CachedRecord> ResourceService<R> {
    /// Stored rows if fresh; otherwise fetch, persist and return the new rows.
    /// Nothing is written when the fetch fails.
    pub async fn get(&self, location: &Location) -> Result<Vec<R>, ServiceError> {
        match self.cache.lookup::<R>(location.id).await? {
            CacheLookup::Hit(rows) => Ok(rows),
            CacheLookup::Miss => {
                let records = self.fetch_fresh(location).await?;
                let written = self.store.save_records(&records, location.id).await?;
                debug!(kind = %R::KIND, location_id = location.id, written, "Cached provider results");
                Ok(records)
            }
        }
    }
}
