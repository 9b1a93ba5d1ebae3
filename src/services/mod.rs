pub mod cache;
pub use cache::{CacheLookup, CachePolicy};

pub mod location;
pub use location::LocationService;

pub mod resource;
pub use resource::ResourceService;

#[cfg(test)]
pub(crate) mod testing;

use crate::clients::FetchError;
use crate::db::StoreError;
use thiserror::Error;

/// Everything that can abort a request once it reaches the services.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("location {0:?} was neither inserted nor found")]
    LocationConflict(String),

    #[error("no stored location with id {0}")]
    UnknownLocation(i32),

    #[error("invalid query: {0}")]
    InvalidQuery(String),
}
