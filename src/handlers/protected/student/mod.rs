// handlers/protected/student/mod.rs - /api/Student handlers, one file per verb
pub mod create;
pub mod delete;
pub mod get;
pub mod patch;
pub mod update;

pub use create::create;
pub use delete::delete;
pub use get::{get, list};
pub use patch::update_partial;
pub use update::update;

use axum::Extension;

use crate::error::ApiError;
use crate::middleware::AuthUser;

const PARTIAL_UPDATE_SUFFIX: &str = "UpdatePartial";

/// What the `{key}` segment of `/api/Student/{key}` names.
#[derive(Debug, PartialEq, Eq)]
pub enum StudentKey {
    Id(i32),
    Name(String),
}

impl StudentKey {
    /// Integers are ids, ASCII-alphabetic segments are names, anything else is a bad request.
    pub fn parse(segment: &str) -> Result<Self, ApiError> {
        if let Ok(id) = segment.parse::<i32>() {
            return Ok(StudentKey::Id(id));
        }
        if !segment.is_empty() && segment.chars().all(|c| c.is_ascii_alphabetic()) {
            return Ok(StudentKey::Name(segment.to_string()));
        }
        Err(ApiError::bad_request(format!("The value '{}' is not valid.", segment)))
    }
}

/// Parse a segment that must be an id.
pub fn parse_id(segment: &str) -> Result<i32, ApiError> {
    segment
        .parse::<i32>()
        .map_err(|_| ApiError::bad_request(format!("The value '{}' is not valid.", segment)))
}

/// `{id}UpdatePartial` -> id. A segment without the suffix names no route.
pub fn parse_partial_update_segment(segment: &str) -> Result<i32, ApiError> {
    let id = segment
        .strip_suffix(PARTIAL_UPDATE_SUFFIX)
        .ok_or_else(|| ApiError::not_found(format!("No route for PATCH /api/Student/{}", segment)))?;
    parse_id(id)
}

/// Reject non-positive ids before touching the store.
pub fn require_positive(id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        tracing::warn!(id, "Bad Request");
        return Err(ApiError::bad_request(format!("Invalid student id {}", id)));
    }
    Ok(id)
}

/// Who is making a change, for the audit log. Open routes carry no user.
pub fn caller(user: &Option<Extension<AuthUser>>) -> &str {
    user.as_ref()
        .map(|Extension(user)| user.name.as_str())
        .unwrap_or("anonymous")
}

pub fn student_not_found(id: i32) -> ApiError {
    tracing::warn!(id, "Student not found with given ID");
    ApiError::not_found(format!("The Student with id {} not found", id))
}
