use serde::{Deserialize, Serialize};

/// Status given to every newly created assignment
pub const STATUS_PENDING: &str = "pending";
/// Status set by the submit endpoint
pub const STATUS_SUBMITTED: &str = "submitted";

/// A single assignment record.
///
/// `status` is open text: the documented values are `pending`, `submitted` and `late`,
/// but the update endpoints accept any string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: i64,
    pub title: String,
    pub course: String,
    pub due_date: Option<String>,
    pub status: String,
}

impl Assignment {
    pub fn new(
        id: i64,
        title: impl Into<String>,
        course: impl Into<String>,
        due_date: Option<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            course: course.into(),
            due_date,
            status: STATUS_PENDING.into(),
        }
    }
}
