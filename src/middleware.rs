//! Contains the middleware run on every request before it reaches a route: the request logger
//! and the test-only error injector.

use std::time::Instant;

use axum::{
    extract::{OriginalUri, Request},
    middleware::Next,
    response::Response,
};
use chrono::{SecondsFormat, Utc};
use tracing::info;

use crate::{error::ApiError, model::request::TestFlags};

/// Logs one line per request once the response has been produced, whatever its status.
pub async fn log_request(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request
        .extensions()
        .get::<OriginalUri>()
        .map(|OriginalUri(uri)| uri.clone())
        .unwrap_or_else(|| request.uri().clone());

    let response = next.run(request).await;

    info!(
        "[{}] {} {} -> {} ({}ms)",
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        method,
        uri,
        response.status().as_u16(),
        start.elapsed().as_millis()
    );

    response
}

/// Fails the request with a 500 before any route runs when `?forceError=true` is present.
pub async fn inject_error(request: Request, next: Next) -> Result<Response, ApiError> {
    if TestFlags::from_uri(request.uri()).is_force_error() {
        return Err(ApiError::Forced);
    }

    Ok(next.run(request).await)
}
