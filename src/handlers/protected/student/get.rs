// handlers/protected/student/get.rs - GET /api/Student/All and GET /api/Student/{key}

use axum::extract::{Path, State};

use super::{require_positive, student_not_found, StudentKey};
use crate::api::StudentDto;
use crate::database::{Repository, StudentRepository};
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/Student/All - every student, mapped to the transfer shape
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<StudentDto>> {
    tracing::info!("Listing students");
    let students = state.students.get_all().await?;
    let dtos = students.into_iter().map(StudentDto::from).collect();
    Ok(ApiResponse::success(dtos))
}

/// GET /api/Student/{id} or /api/Student/{name}
pub async fn get(State(state): State<AppState>, Path(key): Path<String>) -> ApiResult<StudentDto> {
    match StudentKey::parse(&key)? {
        StudentKey::Id(id) => get_by_id(&state, id).await,
        StudentKey::Name(name) => get_by_name(&state, &name).await,
    }
}

async fn get_by_id(state: &AppState, id: i32) -> ApiResult<StudentDto> {
    let id = require_positive(id)?;
    let student = state
        .students
        .get_by_id(id, false)
        .await?
        .ok_or_else(|| student_not_found(id))?;
    Ok(ApiResponse::success(StudentDto::from(student)))
}

// Only the first (lowest id) match is returned; names are not unique.
async fn get_by_name(state: &AppState, name: &str) -> ApiResult<StudentDto> {
    if name.is_empty() {
        return Err(ApiError::bad_request("Student name is required"));
    }
    let student = state.students.get_by_name(name).await?.ok_or_else(|| {
        tracing::warn!(name, "Student not found with given name");
        ApiError::not_found(format!("The Student with name {} not found", name))
    })?;
    Ok(ApiResponse::success(StudentDto::from(student)))
}
