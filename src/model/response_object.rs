use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum Outcome {
    Success,
    Error,
}

#[derive(Debug, Serialize)]
struct Body {
    status: Outcome,
    data: Value,
}

/// The `{ status, data }` envelope every response is wrapped in.
#[derive(Debug)]
pub struct ResponseObject {
    status: StatusCode,
    body: Body,
}

impl ResponseObject {
    /// `{ "status": "success", "data": data }`
    pub fn success(status: StatusCode, data: Value) -> Self {
        Self {
            status,
            body: Body {
                status: Outcome::Success,
                data,
            },
        }
    }

    /// `{ "status": "error", "data": { "message": message } }`
    ///
    /// Extra fields are added next to the message with [`ResponseObject::with`].
    pub fn failure(status: StatusCode, message: impl Into<String>) -> Self {
        let mut data = Map::new();
        data.insert("message".into(), Value::String(message.into()));

        Self {
            status,
            body: Body {
                status: Outcome::Error,
                data: Value::Object(data),
            },
        }
    }

    /// Adds a field alongside the message of a failure. Has no effect on a success.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        if let (Outcome::Error, Value::Object(data)) = (&self.body.status, &mut self.body.data) {
            data.insert(key.into(), value.into());
        }
        self
    }
}

impl IntoResponse for ResponseObject {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
