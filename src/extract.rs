use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{header::CONTENT_TYPE, request::Parts},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    endpoints::{PathId, parse_id},
    error::ApiError,
};

/// The `{id}` path segment. A segment that cannot be decoded is raised to the error handler
/// instead of being answered by axum.
impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw_id) = Path::<String>::from_request_parts(parts, state).await?;
        Ok(parse_id(&raw_id))
    }
}

/// Lenient JSON body.
///
/// Bodies that are not JSON (by content type) or are empty deserialize as `{}` instead of being
/// rejected. A JSON body must be an object or an array; an array carries no fields.
#[derive(Debug)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(is_json_content_type);

        let bytes = Bytes::from_request(request, state).await?;

        if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Payload(T::default()));
        }

        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::MalformedBody(format!("Malformed JSON body: {e}")))?;

        match value {
            Value::Object(_) => serde_json::from_value(value)
                .map(Payload)
                .map_err(|e| ApiError::MalformedBody(format!("Invalid JSON body: {e}"))),
            Value::Array(_) => Ok(Payload(T::default())),
            _ => Err(ApiError::MalformedBody(
                "JSON body must be an object or an array".into(),
            )),
        }
    }
}

fn is_json_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}
