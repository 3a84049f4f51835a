//! User handler tests.

use axum::http::{Method, StatusCode};
use codeshot_storage::UserId;

use super::super::common::*;

#[tokio::test]
async fn me_returns_the_authenticated_user() {
    let server = create_test_server().await;
    let user = create_test_user(&server, "test@example.com").await;

    let (status, body) = send(
        test_router(&server),
        Method::GET,
        "/api/v1/user/me",
        Some(&user.id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], user.id.0);
    assert_eq!(body["email"], "test@example.com");
}

#[tokio::test]
async fn me_with_unknown_identity_is_401() {
    let server = create_test_server().await;

    let (status, body) = send(
        test_router(&server),
        Method::GET,
        "/api/v1/user/me",
        Some(&UserId::from("ghost")),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UnauthorizedException");
}

#[tokio::test]
async fn me_without_identity_is_401() {
    let server = create_test_server().await;

    let (status, body) = send(
        test_router(&server),
        Method::GET,
        "/api/v1/user/me",
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UnauthorizedException");
}
