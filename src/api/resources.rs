//! Per-kind resource routes. Each decodes the location id from `data`,
//! swaps the client's copy for the stored row, and hands it to the matching
//! service.

use axum::{
    Json,
    extract::{RawQuery, State},
};
use std::sync::Arc;

use super::observability::record_resource;
use super::params::location_from_query;
use super::{ApiError, AppState};
use crate::models::{Business, Location, Meetup, Movie, Resource, Trail, Weather};

/// Unknown ids are rejected here, before any cache lookup or upstream call.
async fn stored_location<R: Resource>(
    state: &AppState,
    query: Option<&str>,
) -> Result<Location, ApiError> {
    let requested = location_from_query(query)?;
    let location = state.shared.locations.stored(requested.id).await?;
    record_resource(R::KIND, location.id);
    Ok(location)
}

pub async fn get_weather(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<Weather>>, ApiError> {
    let location = stored_location::<Weather>(&state, query.as_deref()).await?;
    Ok(Json(state.shared.weather.get(&location).await?))
}

pub async fn get_businesses(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<Business>>, ApiError> {
    let location = stored_location::<Business>(&state, query.as_deref()).await?;
    Ok(Json(state.shared.businesses.get(&location).await?))
}

/// Movies are never cached; every call goes upstream.
pub async fn get_movies(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let location = stored_location::<Movie>(&state, query.as_deref()).await?;
    Ok(Json(state.shared.movies.fetch_fresh(&location).await?))
}

pub async fn get_meetups(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<Meetup>>, ApiError> {
    let location = stored_location::<Meetup>(&state, query.as_deref()).await?;
    Ok(Json(state.shared.meetups.get(&location).await?))
}

pub async fn get_trails(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<Trail>>, ApiError> {
    let location = stored_location::<Trail>(&state, query.as_deref()).await?;
    Ok(Json(state.shared.trails.get(&location).await?))
}
