//! REST handlers, one module per resource, plus the router wiring them up.

pub mod presets;
pub mod projects;
pub mod users;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use codeshot_storage::StoreError;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::server::ApiServer;

/// Build the application router. The `/metrics` route is attached separately
/// in `main` because it owns the Prometheus handle.
pub fn router(server: ApiServer, config: &ServerConfig) -> Router {
    let cors = match &config.cors_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.clone())
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::permissive(),
    };

    let api = Router::new()
        .route("/user/me", get(users::me))
        .route(
            "/preset",
            post(presets::create_preset).get(presets::list_presets),
        )
        .route(
            "/preset/{id}",
            get(presets::get_preset)
                .put(presets::update_preset)
                .delete(presets::delete_preset),
        )
        .route(
            "/project",
            post(projects::create_project).get(projects::list_projects),
        )
        .route(
            "/project/{id}",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        );

    Router::new()
        .nest("/api/v1", api)
        .route("/health", get(health_handler))
        .route("/ready", get(readiness_handler))
        .layer(axum::middleware::from_fn(crate::metrics::track_http))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(server)
}

/// Liveness: the process is up.
async fn health_handler() -> &'static str {
    "ok"
}

/// Readiness: the database answers queries. A not-found answer is an answer.
async fn readiness_handler(
    State(server): State<ApiServer>,
) -> Result<&'static str, StatusCode> {
    match server.store.get_user_by_email("readiness-probe").await {
        Ok(_) | Err(StoreError::NotFound) => Ok("ok"),
        Err(_) => Err(StatusCode::SERVICE_UNAVAILABLE),
    }
}
