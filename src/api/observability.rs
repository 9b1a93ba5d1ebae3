//! Request logging and the Prometheus scrape endpoint.
//!
//! Every request runs inside a `request` span. Resource handlers fill in the
//! kind and location they served, and the cache fills in its outcome, so the
//! single "request finished" event says whether an upstream call was made.

use axum::{
    extract::{MatchedPath, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, Span, field::Empty, info, info_span};
use uuid::Uuid;

use crate::api::AppState;
use crate::models::ResourceKind;

pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled or failed to initialize".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

/// Tags the current request span with the resource being served.
pub fn record_resource(kind: ResourceKind, location_id: i32) {
    let span = Span::current();
    span.record("resource", kind.as_str());
    span.record("location_id", location_id);
    if !kind.is_cached() {
        span.record("cache", "bypass");
    }
}

fn outcome(status: StatusCode) -> &'static str {
    if status.is_server_error() {
        "error"
    } else if status.is_client_error() {
        "client_error"
    } else {
        "success"
    }
}

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    // Unmatched paths share one label to keep cardinality bounded.
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or("unmatched", MatchedPath::as_str)
        .to_string();
    let method = req.method().to_string();

    let span = info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %method,
        route = %route,
        resource = Empty,
        location_id = Empty,
        cache = Empty,
    );

    async move {
        let response = next.run(req).await;
        let status = response.status();

        let labels = [
            ("method", method),
            ("path", route),
            ("status", status.as_u16().to_string()),
        ];
        metrics::counter!("http_requests_total", &labels).increment(1);
        metrics::histogram!("http_request_duration_seconds", &labels)
            .record(start.elapsed().as_secs_f64());

        info!(
            event = "http_request_finished",
            duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            status_code = status.as_u16(),
            outcome = outcome(status),
            "Request finished"
        );

        response
    }
    .instrument(span)
    .await
}
