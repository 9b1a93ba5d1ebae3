//! Freshness policy for stored provider results.
//!
//! Rows for a (kind, location) pair are served while the oldest one is within
//! the kind's threshold. Once stale, every row for the pair is deleted and the
//! caller sees a miss, so the only mutation besides insert is a full
//! delete-then-reinsert.

use crate::db::{Store, StoreError};
use crate::models::{CachedRecord, ResourceKind, now_millis};
use tracing::{Span, debug};

/// Outcome of a cache lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup<R> {
    /// Stored rows, still fresh.
    Hit(Vec<R>),
    /// Nothing usable is stored; the caller must fetch.
    Miss,
}

#[derive(Clone)]
pub struct CachePolicy {
    store: Store,
}

impl CachePolicy {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn lookup<R: CachedRecord>(
        &self,
        location_id: i32,
    ) -> Result<CacheLookup<R>, StoreError> {
        self.lookup_at(location_id, now_millis()).await
    }

    /// Same as [`lookup`](Self::lookup) with an explicit clock, in epoch
    /// milliseconds.
    pub async fn lookup_at<R: CachedRecord>(
        &self,
        location_id: i32,
        now: i64,
    ) -> Result<CacheLookup<R>, StoreError> {
        let kind = R::KIND;
        let rows: Vec<R> = self.store.query_records(location_id).await?;

        let Some(oldest) = rows.first().map(|r| r.created_at()) else {
            record_outcome(kind, "miss");
            debug!(%kind, location_id, "Cache miss");
            return Ok(CacheLookup::Miss);
        };

        if is_stale(kind, oldest, now) {
            let removed = self
                .store
                .delete_records_by_location_id::<R>(location_id)
                .await?;
            record_outcome(kind, "stale");
            debug!(
                %kind,
                location_id,
                removed,
                age_ms = now - oldest,
                "Cache stale, rows dropped"
            );
            return Ok(CacheLookup::Miss);
        }

        record_outcome(kind, "hit");
        debug!(%kind, location_id, rows = rows.len(), "Cache hit");
        Ok(CacheLookup::Hit(rows))
    }
}

/// Rows exactly at the threshold are still fresh.
#[must_use]
pub fn is_stale(kind: ResourceKind, created_at: i64, now: i64) -> bool {
    kind.freshness_threshold()
        .is_some_and(|threshold| now - created_at > threshold.num_milliseconds())
}

/// Counted per kind and noted on the enclosing request span, if any.
fn record_outcome(kind: ResourceKind, outcome: &'static str) {
    Span::current().record("cache", outcome);
    metrics::counter!(
        "cache_lookups_total",
        "resource" => kind.as_str(),
        "outcome" => outcome
    )
    .increment(1);
}
