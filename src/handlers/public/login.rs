// handlers/public/login.rs - POST /api/Login handler

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use validator::Validate;

use crate::api::{LoginDto, LoginResponseDto};
use crate::auth::{generate_jwt, Claims, ADMIN_ROLE};
use crate::error::ApiError;
use crate::state::AppState;

const CREDENTIALS_REQUIRED: &str = "Please provide username and password";
const INVALID_CREDENTIALS: &str = "Invalid Credentials";

// The service knows exactly one account.
const ACCOUNT_USERNAME: &str = "Venkat";
const ACCOUNT_PASSWORD: &str = "Venkat123";

/// POST /api/Login - exchange username/password for a signed token
///
/// A wrong pair answers 200 with a plain-text `Invalid Credentials` body unless
/// `security.strict_login_status` is set, in which case it is a 401.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Option<LoginDto>>, JsonRejection>,
) -> Result<Response, ApiError> {
    let credentials = match payload {
        Ok(Json(Some(dto))) if dto.validate().is_ok() => dto,
        _ => return Err(ApiError::bad_request(CREDENTIALS_REQUIRED)),
    };

    if !is_valid_account(&credentials) {
        tracing::warn!(username = %credentials.username, "Rejected login");
        if state.config.security.strict_login_status {
            return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
        }
        return Ok((StatusCode::OK, INVALID_CREDENTIALS).into_response());
    }

    let security = &state.config.security;
    let token = Claims::new(credentials.username.clone(), ADMIN_ROLE, security.jwt_expiry_hours)
        .and_then(|claims| generate_jwt(&claims, security))
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to issue token");
            ApiError::internal_server_error("Failed to issue token")
        })?;

    tracing::info!(username = %credentials.username, "Issued token");
    Ok(Json(LoginResponseDto {
        username: credentials.username,
        token,
    })
    .into_response())
}

fn is_valid_account(credentials: &LoginDto) -> bool {
    credentials.username == ACCOUNT_USERNAME && credentials.password == ACCOUNT_PASSWORD
}
