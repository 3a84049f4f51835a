//! Common test helpers and utilities for server tests.
//!
//! This module provides shared test infrastructure including:
//! - Test server creation (in-memory SQLite)
//! - User, preset, and project seeding helpers
//! - A oneshot request helper that drives the real router

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use codeshot_storage::{
    CreatePresetParams, CreateProjectParams, CreateTabParams, CreateUserParams, EditorOptions,
    Frame, Preset, Project, Terminal, User, UserId,
};
use codeshot_store_sqlite::SqliteStore;
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::auth::USER_HEADER;
use crate::config::ServerConfig;
use crate::handlers;
use crate::server::ApiServer;

/// Test helper: Create an ApiServer with in-memory SQLite
pub async fn create_test_server() -> ApiServer {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    ApiServer::new(store)
}

/// Test helper: Build the real application router around a test server
pub fn test_router(server: &ApiServer) -> Router {
    handlers::router(server.clone(), &ServerConfig::default())
}

/// Test helper: Drive one request through the router; returns status and
/// parsed JSON body (null for empty bodies).
pub async fn send(
    router: Router,
    method: Method,
    uri: &str,
    user: Option<&UserId>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header(USER_HEADER, user.0.as_str());
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Test helper: Create a user
pub async fn create_test_user(server: &ApiServer, email: &str) -> User {
    server
        .store
        .create_user(&CreateUserParams {
            email: email.to_string(),
        })
        .await
        .unwrap()
}

/// Test helper: Create a preset owned by `owner`
pub async fn create_test_preset(server: &ApiServer, owner: &UserId, name: &str) -> Preset {
    server
        .store
        .create_preset(&CreatePresetParams {
            owner_id: owner.clone(),
            name: name.to_string(),
            data: serde_json::json!({"frame": {"background": "#000"}}),
        })
        .await
        .unwrap()
}

pub fn test_frame() -> Frame {
    Frame {
        background: "#abc".into(),
        opacity: 100.0,
        visible: true,
        radius: 24,
        padding: 64,
    }
}

pub fn test_editor_options() -> EditorOptions {
    EditorOptions {
        font_weight: 400,
        show_line_numbers: true,
        font_id: "1".into(),
        theme_id: "oneDark".into(),
        enable_ligatures: false,
    }
}

pub fn test_terminal() -> Terminal {
    Terminal {
        opacity: 1.0,
        background: "#0f0f0f".into(),
        text_color: "#fff".into(),
        show_watermark: true,
        show_header: true,
        show_glass_reflection: false,
        shadow: None,
        alternative_theme: false,
        accent_visible: true,
        kind: "macOs".into(),
    }
}

/// Test helper: Create a project with one editor tab, owned by `owner`
pub async fn create_test_project(server: &ApiServer, owner: &UserId, name: &str) -> Project {
    server
        .store
        .create_project(&CreateProjectParams {
            owner_id: owner.clone(),
            name: name.to_string(),
            frame: test_frame(),
            editor_options: test_editor_options(),
            terminal: test_terminal(),
            editor_tabs: vec![CreateTabParams {
                code: "console.log(1)".into(),
                language_id: "typescript".into(),
                tab_name: "index.ts".into(),
            }],
        })
        .await
        .unwrap()
}
