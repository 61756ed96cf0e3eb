// handlers/public/service.rs - GET / and GET /health

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / - service description
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "name": "College API",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.config.environment,
        "store": state.config.database.store,
        "endpoints": {
            "students": "/api/Student/All, /api/Student/{id|name}",
            "create": "POST /api/Student/Create",
            "update": "PUT /api/Student/Update",
            "partial_update": "PATCH /api/Student/{id}UpdatePartial",
            "delete": "DELETE /api/Student/{id}",
            "login": "POST /api/Login",
            "health": "/health",
        },
        "auth_required": state.config.security.require_auth,
    }))
}

/// GET /health - store liveness
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    let Some(database) = &state.database else {
        return (
            StatusCode::OK,
            Json(json!({ "status": "ok", "timestamp": now, "store": "memory" })),
        );
    };

    match database.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "timestamp": now, "store": "postgres" })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "store": "postgres",
                    "error": "database unavailable",
                })),
            )
        }
    }
}
