use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers::{protected::student, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Build the full application router over the given state.
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .route("/api/Login", post(public::login))
        // Student records
        .merge(student_routes(&state))
        .layer(cors_layer(&config.security));

    let router = if config.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    };

    router.with_state(state)
}

fn student_routes(state: &AppState) -> Router<AppState> {
    let routes = Router::new()
        // Static segments win over `:key`, so `All`, `Create` and `Update` never reach the lookup
        .route("/api/Student/All", get(student::list))
        .route("/api/Student/Create", post(student::create))
        .route("/api/Student/Update", put(student::update))
        .route(
            "/api/Student/:key",
            get(student::get)
                .patch(student::update_partial)
                .delete(student::delete),
        );

    if state.config.security.require_auth {
        routes.route_layer(middleware::from_fn_with_state(state.clone(), jwt_auth_middleware))
    } else {
        routes
    }
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_permissive {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
