use axum::{extract::Query, http::Uri};
use serde::Deserialize;
use serde_json::Value;

/// Body accepted by the assignment endpoints.
///
/// Every field is kept as raw JSON so presence checks can tell "missing" apart from
/// "present but the wrong type" the way each endpoint needs.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientRequest {
    // Create / full update
    pub title: Option<Value>,
    pub course: Option<Value>,
    pub due_date: Option<Value>,

    // Full update / status update
    pub status: Option<Value>,

    // Submit
    pub crash: Option<Value>,
}

impl ClientRequest {
    /// Returns (title, course) if both are non-empty strings
    pub fn get_title_course(&self) -> Option<(String, String)> {
        if let (Some(title), Some(course)) =
            (non_empty_text(&self.title), non_empty_text(&self.course))
        {
            Some((title, course))
        } else {
            None
        }
    }

    /// Returns the due date if it is a non-empty string. Empty strings count as absent.
    pub fn get_due_date(&self) -> Option<String> {
        non_empty_text(&self.due_date)
    }

    /// Returns the status if it is a string, including the empty string
    pub fn get_status(&self) -> Option<String> {
        match &self.status {
            Some(Value::String(s)) => Some(s.clone()),
            _ => None,
        }
    }

    /// Only a literal JSON `true` triggers the simulated crash
    pub fn wants_crash(&self) -> bool {
        matches!(self.crash, Some(Value::Bool(true)))
    }
}

fn non_empty_text(value: &Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Query parameters that switch on the test-only failure modes.
///
/// Each flag is read on its own: it is on only when its key appears exactly once with the
/// value `"true"`, whatever else the query holds.
#[derive(Debug, Default)]
pub struct TestFlags {
    pairs: Vec<(String, String)>,
}

impl TestFlags {
    pub const FORCE_ERROR: &'static str = "forceError";
    pub const MAINTENANCE: &'static str = "maintenance";

    /// Reads the flags from a request URI. A query string that fails to parse switches nothing on.
    pub fn from_uri(uri: &Uri) -> Self {
        let pairs = Query::<Vec<(String, String)>>::try_from_uri(uri)
            .map(|Query(pairs)| pairs)
            .unwrap_or_default();
        Self { pairs }
    }

    fn is_on(&self, key: &str) -> bool {
        let mut values = self.pairs.iter().filter(|(k, _)| k == key).map(|(_, v)| v);
        matches!((values.next(), values.next()), (Some(v), None) if v == "true")
    }

    pub fn is_force_error(&self) -> bool {
        self.is_on(Self::FORCE_ERROR)
    }

    pub fn is_maintenance(&self) -> bool {
        self.is_on(Self::MAINTENANCE)
    }
}
