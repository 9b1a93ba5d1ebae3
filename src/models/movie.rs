use super::{Resource, ResourceKind};
use serde::Serialize;

/// A film whose title matches the location's search text. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movie {
    pub title: String,
    pub overview: String,
    pub average_votes: f64,
    pub total_votes: i64,
    pub image_url: Option<String>,
    pub popularity: f64,
    pub released_on: Option<String>,
}

impl Resource for Movie {
    const KIND: ResourceKind = ResourceKind::Movie;
}
