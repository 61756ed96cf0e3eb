// handlers/protected/student/delete.rs - DELETE /api/Student/{id}

use axum::{
    extract::{Path, State},
    Extension,
};

use super::{caller, parse_id, require_positive, student_not_found};
use crate::database::{Repository, StudentRepository};
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::middleware::AuthUser;
use crate::state::AppState;

/// DELETE /api/Student/{id} - 200 with `true` once the row is gone
pub async fn delete(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    user: Option<Extension<AuthUser>>,
) -> ApiResult<bool> {
    let id = require_positive(parse_id(&segment)?)?;

    let student = state
        .students
        .get_by_id(id, false)
        .await?
        .ok_or_else(|| student_not_found(id))?;

    if !state.students.delete(student).await? {
        return Err(student_not_found(id));
    }
    tracing::info!(id, caller = caller(&user), "Deleted student");

    Ok(ApiResponse::success(true))
}
