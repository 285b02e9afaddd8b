//! Contains all endpoint-associated functions.
//!
//! The assignment CRUD endpoints live in the `assignment` submodule. This module holds the
//! fallback for unmatched routes and the helpers the endpoints share.

use axum::http::StatusCode;
use serde_json::Value;

use crate::model::response_object::ResponseObject;

pub mod assignment;

pub const ROUTE_NOT_FOUND: &str = "The requested path could not be found.";

/// Catch-all for requests no route matched, including a known path with an unsupported method
pub async fn route_not_found() -> ResponseObject {
    ResponseObject::failure(StatusCode::NOT_FOUND, ROUTE_NOT_FOUND)
}

/// An `{id}` path segment after lenient parsing
#[derive(Debug, Clone, PartialEq)]
pub struct PathId {
    /// The id to look up. `None` never matches an assignment.
    pub id: Option<i64>,
    /// What a 404 reports back as `id`
    pub echo: Value,
}

/// Parses a path id the lenient way: leading whitespace, an optional sign, then as many decimal
/// digits as are present. `"12abc"` is 12.
///
/// No leading digits gives no id and a `null` echo. Digits too large for an `i64` match nothing
/// but are still echoed, as a float.
pub fn parse_id(raw: &str) -> PathId {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    let digits = &rest[..digits_len];
    let signed = |digits: &str| {
        if negative {
            format!("-{digits}")
        } else {
            digits.to_string()
        }
    };

    if digits.is_empty() {
        return PathId {
            id: None,
            echo: Value::Null,
        };
    }

    match signed(digits).parse::<i64>() {
        Ok(id) => PathId {
            id: Some(id),
            echo: Value::from(id),
        },
        // Non-finite floats become null
        Err(_) => PathId {
            id: None,
            echo: signed(digits)
                .parse::<f64>()
                .map(Value::from)
                .unwrap_or(Value::Null),
        },
    }
}
