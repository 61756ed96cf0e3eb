// handlers/protected/student/patch.rs - PATCH /api/Student/{id}UpdatePartial

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};

use super::{caller, parse_partial_update_segment, require_positive, student_not_found};
use crate::api::{mapping::replace_student, patch::patch_student, PatchOperation, StudentDto};
use crate::database::{Repository, StudentRepository};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// PATCH /api/Student/{id}UpdatePartial - apply a JSON Patch to one student
///
/// The patch runs against the transfer shape and the result is validated before anything
/// is written, so a rejected patch leaves the stored row as it was.
pub async fn update_partial(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    user: Option<Extension<AuthUser>>,
    payload: Result<Json<Option<Vec<PatchOperation>>>, JsonRejection>,
) -> ApiResult<()> {
    let id = parse_partial_update_segment(&segment)?;
    let Json(operations) = payload?;
    let operations = operations
        .filter(|ops| !ops.is_empty())
        .ok_or_else(|| ApiError::bad_request("Patch document is required"))?;
    let id = require_positive(id)?;

    let existing = state
        .students
        .get_by_id(id, true)
        .await?
        .ok_or_else(|| student_not_found(id))?;

    let patched = patch_student(&StudentDto::from(existing.clone()), &operations)?;
    state.students.update(replace_student(&existing, patched)).await?;
    tracing::info!(id, operations = operations.len(), caller = caller(&user), "Patched student");

    Ok(ApiResponse::no_content())
}
