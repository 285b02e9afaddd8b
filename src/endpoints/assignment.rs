use axum::{
    extract::State,
    http::{StatusCode, Uri},
};
use chrono::{SecondsFormat, Utc};
use serde_json::json;

use crate::{
    endpoints::PathId,
    error::ApiError,
    extract::Payload,
    model::{
        assignment::{Assignment, STATUS_SUBMITTED},
        request::{ClientRequest, TestFlags},
        response_object::ResponseObject,
    },
    store::{AppState, AssignmentStore},
};

pub const ASSIGNMENT_NOT_FOUND: &str = "No assignment was found with the given ID.";
pub const MISSING_TITLE_COURSE: &str = "title and course are required.";
pub const STATUS_NOT_TEXT: &str = "The status field must be a string.";
pub const UNDER_MAINTENANCE: &str =
    "The assignment service is currently under maintenance. Please try again later.";
pub const ALL_DELETED: &str = "All assignments have been deleted.";

type EndpointResult = Result<ResponseObject, ApiError>;

fn not_found(path_id: PathId) -> ResponseObject {
    ResponseObject::failure(StatusCode::NOT_FOUND, ASSIGNMENT_NOT_FOUND).with("id", path_id.echo)
}

fn missing_title_course() -> ResponseObject {
    ResponseObject::failure(StatusCode::BAD_REQUEST, MISSING_TITLE_COURSE)
}

fn assignment_found(assignment: &Assignment) -> ResponseObject {
    ResponseObject::success(StatusCode::OK, json!({ "assignment": assignment }))
}

fn lookup_mut(store: &mut AssignmentStore, id: Option<i64>) -> Option<&mut Assignment> {
    store.find_by_id_mut(id?)
}

/// Creates a new `pending` assignment from `{ title, course, dueDate? }`
pub async fn create_assignment(
    State(state): State<AppState>,
    Payload(client_req): Payload<ClientRequest>,
) -> EndpointResult {
    let Some((title, course)) = client_req.get_title_course() else {
        return Ok(missing_title_course());
    };

    let mut store = state.store()?;
    let assignment = store.create(title, course, client_req.get_due_date());

    Ok(ResponseObject::success(
        StatusCode::CREATED,
        json!({ "assignment": assignment }),
    ))
}

/// Marks an assignment as submitted.
///
/// `{ "crash": true }` raises a server error instead, leaving the assignment untouched.
pub async fn submit_assignment(
    State(state): State<AppState>,
    path_id: PathId,
    Payload(client_req): Payload<ClientRequest>,
) -> EndpointResult {
    let id = path_id.id;
    let mut store = state.store()?;

    let Some(assignment) = lookup_mut(&mut store, id) else {
        return Ok(not_found(path_id));
    };

    if client_req.wants_crash() {
        return Err(ApiError::SubmitCrash(assignment.id));
    }

    assignment.status = STATUS_SUBMITTED.into();
    Ok(assignment_found(assignment))
}

/// Lists every assignment, or answers 503 when `?maintenance=true` is present
pub async fn list_assignments(State(state): State<AppState>, uri: Uri) -> EndpointResult {
    if TestFlags::from_uri(&uri).is_maintenance() {
        return Ok(
            ResponseObject::failure(StatusCode::SERVICE_UNAVAILABLE, UNDER_MAINTENANCE).with(
                "timestamp",
                Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            ),
        );
    }

    let store = state.store()?;
    Ok(ResponseObject::success(
        StatusCode::OK,
        json!({ "assignments": store.all() }),
    ))
}

pub async fn get_assignment(
    State(state): State<AppState>,
    path_id: PathId,
) -> EndpointResult {
    let id = path_id.id;
    let store = state.store()?;

    match id.and_then(|id| store.find_by_id(id)) {
        Some(assignment) => Ok(assignment_found(assignment)),
        None => Ok(not_found(path_id)),
    }
}

/// Replaces title and course. `dueDate` and `status` only change when a usable value is sent.
///
/// The assignment must exist before the body is validated, so a missing id wins over a bad body.
pub async fn update_assignment(
    State(state): State<AppState>,
    path_id: PathId,
    Payload(client_req): Payload<ClientRequest>,
) -> EndpointResult {
    let id = path_id.id;
    let mut store = state.store()?;

    let Some(assignment) = lookup_mut(&mut store, id) else {
        return Ok(not_found(path_id));
    };

    let Some((title, course)) = client_req.get_title_course() else {
        return Ok(missing_title_course());
    };

    assignment.title = title;
    assignment.course = course;
    // null, missing and "" all leave the due date alone
    if let Some(due_date) = client_req.get_due_date() {
        assignment.due_date = Some(due_date);
    }
    if let Some(status) = client_req.get_status() {
        assignment.status = status;
    }

    Ok(assignment_found(assignment))
}

/// Sets the status to any string
pub async fn update_status(
    State(state): State<AppState>,
    path_id: PathId,
    Payload(client_req): Payload<ClientRequest>,
) -> EndpointResult {
    let id = path_id.id;
    let mut store = state.store()?;

    let Some(assignment) = lookup_mut(&mut store, id) else {
        return Ok(not_found(path_id));
    };

    let Some(status) = client_req.get_status() else {
        return Ok(ResponseObject::failure(
            StatusCode::BAD_REQUEST,
            STATUS_NOT_TEXT,
        ));
    };

    assignment.status = status;
    Ok(assignment_found(assignment))
}

pub async fn delete_assignment(
    State(state): State<AppState>,
    path_id: PathId,
) -> EndpointResult {
    let id = path_id.id;
    let mut store = state.store()?;

    let Some(index) = id.and_then(|id| store.find_index_by_id(id)) else {
        return Ok(not_found(path_id));
    };

    let deleted = store.remove_at(index);
    Ok(ResponseObject::success(
        StatusCode::OK,
        json!({ "deleted": deleted }),
    ))
}

pub async fn delete_all_assignments(State(state): State<AppState>) -> EndpointResult {
    let deleted_count = state.store()?.clear();

    Ok(ResponseObject::success(
        StatusCode::OK,
        json!({ "message": ALL_DELETED, "deletedCount": deleted_count }),
    ))
}
