// handlers/protected/student/update.rs - PUT /api/Student/Update

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use validator::Validate;

use super::{caller, require_positive, student_not_found};
use crate::api::{mapping::replace_student, StudentDto};
use crate::database::{Repository, StudentRepository};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// PUT /api/Student/Update - replace every field of an existing student
pub async fn update(
    State(state): State<AppState>,
    user: Option<Extension<AuthUser>>,
    payload: Result<Json<Option<StudentDto>>, JsonRejection>,
) -> ApiResult<()> {
    let Json(dto) = payload?;
    let dto = dto.ok_or_else(|| ApiError::bad_request("Student payload is required"))?;
    let id = require_positive(dto.id)?;
    dto.validate()?;

    let existing = state
        .students
        .get_by_id(id, true)
        .await?
        .ok_or_else(|| student_not_found(id))?;

    state.students.update(replace_student(&existing, dto)).await?;
    tracing::info!(id, caller = caller(&user), "Updated student");

    Ok(ApiResponse::no_content())
}
