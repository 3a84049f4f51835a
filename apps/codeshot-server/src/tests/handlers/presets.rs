//! Preset handler tests.

use axum::http::{Method, StatusCode};
use serde_json::json;

use super::super::common::*;

#[tokio::test]
async fn put_preset_returns_updated_preset() {
    let server = create_test_server().await;
    let user = create_test_user(&server, "test@example.com").await;
    let preset = create_test_preset(&server, &user.id, "preset-1").await;

    let payload = json!({
        "name": "updated",
        "data": {"frame": {"background": "#fff"}, "terminal": {"type": "windows"}},
    });

    let (status, body) = send(
        test_router(&server),
        Method::PUT,
        &format!("/api/v1/preset/{}", preset.id),
        Some(&user.id),
        Some(payload.clone()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "updated");
    assert_eq!(body["data"], payload["data"]);
    assert_eq!(body["id"], preset.id.0);
    assert_eq!(body["ownerId"], user.id.0);
    assert_ne!(body["updatedAt"], json!(preset.updated_at));
}

#[tokio::test]
async fn put_preset_unknown_id_is_404_with_exact_error() {
    let server = create_test_server().await;
    let user = create_test_user(&server, "test@example.com").await;

    let (status, body) = send(
        test_router(&server),
        Method::PUT,
        "/api/v1/preset/badId",
        Some(&user.id),
        Some(json!({"name": "updated", "data": {"test": "updated"}})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NotFoundPresetException");
    assert_eq!(
        body["message"],
        format!("Preset with id badId for user {} not found", user.id)
    );
}

#[tokio::test]
async fn put_preset_owned_by_someone_else_is_the_same_404() {
    let server = create_test_server().await;
    let caller = create_test_user(&server, "caller@example.com").await;
    let other = create_test_user(&server, "other@example.com").await;
    let preset = create_test_preset(&server, &other.id, "not-yours").await;

    let (status, body) = send(
        test_router(&server),
        Method::PUT,
        &format!("/api/v1/preset/{}", preset.id),
        Some(&caller.id),
        Some(json!({"name": "updated"})),
    )
    .await;

    // Ownership mismatch must be indistinguishable from absence.
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NotFoundPresetException");
    assert_eq!(
        body["message"],
        format!(
            "Preset with id {} for user {} not found",
            preset.id, caller.id
        )
    );

    // And nothing was written.
    let stored = server.store.find_preset(&preset.id).await.unwrap();
    assert_eq!(stored.name, "not-yours");
}

#[tokio::test]
async fn put_preset_partial_patch_keeps_other_fields() {
    let server = create_test_server().await;
    let user = create_test_user(&server, "test@example.com").await;
    let preset = create_test_preset(&server, &user.id, "preset-1").await;

    let (status, body) = send(
        test_router(&server),
        Method::PUT,
        &format!("/api/v1/preset/{}", preset.id),
        Some(&user.id),
        Some(json!({"name": "renamed"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "renamed");
    assert_eq!(body["data"], preset.data);
}

#[tokio::test]
async fn put_preset_without_identity_is_401() {
    let server = create_test_server().await;

    let (status, body) = send(
        test_router(&server),
        Method::PUT,
        "/api/v1/preset/any",
        None,
        Some(json!({"name": "updated"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UnauthorizedException");
}

#[tokio::test]
async fn preset_crud_round_trip() {
    let server = create_test_server().await;
    let user = create_test_user(&server, "test@example.com").await;

    let (status, created) = send(
        test_router(&server),
        Method::POST,
        "/api/v1/preset",
        Some(&user.id),
        Some(json!({"name": "dark", "data": {"themeId": "oneDark"}})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, listed) = send(
        test_router(&server),
        Method::GET,
        "/api/v1/preset",
        Some(&user.id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, fetched) = send(
        test_router(&server),
        Method::GET,
        &format!("/api/v1/preset/{id}"),
        Some(&user.id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "dark");

    let (status, _) = send(
        test_router(&server),
        Method::DELETE,
        &format!("/api/v1/preset/{id}"),
        Some(&user.id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(
        test_router(&server),
        Method::GET,
        &format!("/api/v1/preset/{id}"),
        Some(&user.id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NotFoundPresetException");
}

#[tokio::test]
async fn list_presets_only_shows_own() {
    let server = create_test_server().await;
    let user = create_test_user(&server, "caller@example.com").await;
    let other = create_test_user(&server, "other@example.com").await;
    create_test_preset(&server, &user.id, "mine").await;
    create_test_preset(&server, &other.id, "theirs").await;

    let (status, listed) = send(
        test_router(&server),
        Method::GET,
        "/api/v1/preset",
        Some(&user.id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["name"], "mine");
}

#[tokio::test]
async fn delete_preset_owned_by_someone_else_is_404() {
    let server = create_test_server().await;
    let caller = create_test_user(&server, "caller@example.com").await;
    let other = create_test_user(&server, "other@example.com").await;
    let preset = create_test_preset(&server, &other.id, "not-yours").await;

    let (status, body) = send(
        test_router(&server),
        Method::DELETE,
        &format!("/api/v1/preset/{}", preset.id),
        Some(&caller.id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NotFoundPresetException");
    assert!(server.store.find_preset(&preset.id).await.is_ok());
}
