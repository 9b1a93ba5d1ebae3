use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::validate_search_query;
use super::{ApiError, AppState};
use crate::models::Location;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub data: Option<String>,
}

pub async fn get_location(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Location>, ApiError> {
    let raw = params
        .data
        .ok_or_else(|| ApiError::validation("Missing `data` query parameter"))?;
    let query = validate_search_query(&raw)?;

    let location = state.shared.locations.resolve(query).await?;
    Ok(Json(location))
}
