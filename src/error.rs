//! The errors raised while handling a request, and the terminal handler that turns them into
//! responses.

use axum::{
    extract::rejection::{BytesRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::model::response_object::ResponseObject;

/// The only message a client ever sees for a 500
pub const SERVER_ERROR_MESSAGE: &str = "A server error occurred.";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Raised by the error injector for `?forceError=true`
    #[error("forced server error")]
    Forced,

    /// Raised by the submit endpoint when the body asks for a crash
    #[error("simulated crash while submitting assignment {0}")]
    SubmitCrash(i64),

    #[error("{0}")]
    MalformedBody(String),

    /// The request body could not be read (too large, aborted, ...)
    #[error("{message}")]
    Body { status: StatusCode, message: String },

    /// A path parameter could not be decoded
    #[error("{message}")]
    Path { status: StatusCode, message: String },

    #[error("assignment store lock poisoned")]
    StorePoisoned,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Body { status, .. } | ApiError::Path { status, .. } => *status,
            ApiError::Forced | ApiError::SubmitCrash(_) | ApiError::StorePoisoned => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        ApiError::Body {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Path {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

/// Terminal error handler.
///
/// Internal detail is logged but never sent: a 500 always carries [`SERVER_ERROR_MESSAGE`],
/// any other status passes the error's own message through.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::error!(error = ?self, status = status.as_u16(), "{self}");

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            SERVER_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        };

        ResponseObject::failure(status, message).into_response()
    }
}
