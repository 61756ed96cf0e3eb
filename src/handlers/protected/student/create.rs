// handlers/protected/student/create.rs - POST /api/Student/Create

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use validator::Validate;

use super::caller;
use crate::api::StudentDto;
use crate::database::{Repository, Student};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /api/Student/Create - 201 with the stored record and its location
pub async fn create(
    State(state): State<AppState>,
    user: Option<Extension<AuthUser>>,
    payload: Result<Json<Option<StudentDto>>, JsonRejection>,
) -> ApiResult<StudentDto> {
    let Json(dto) = payload?;
    let dto = dto.ok_or_else(|| ApiError::bad_request("Student payload is required"))?;
    dto.validate()?;

    let created = state.students.create(Student::from(dto)).await?;
    tracing::info!(id = created.id, caller = caller(&user), "Created student");

    let location = format!("/api/Student/{}", created.id);
    Ok(ApiResponse::created(StudentDto::from(created), location))
}
