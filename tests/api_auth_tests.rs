// SPDX-License-Identifier: MIT
// Copyright 2026 Volink Contributors

//! Route-level authentication tests against an offline app.

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

#[tokio::test]
async fn test_health_is_public() {
    let app = common::offline_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_security_headers_on_every_response() {
    let app = common::offline_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::X_CONTENT_TYPE_OPTIONS)
            .unwrap(),
        "nosniff"
    );
    assert_eq!(
        response.headers().get(header::X_FRAME_OPTIONS).unwrap(),
        "DENY"
    );
}

#[tokio::test]
async fn test_api_requires_token() {
    let app = common::offline_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/events")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_api_rejects_garbage_token() {
    let app = common::offline_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/events")
                .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_api_rejects_token_from_other_key() {
    let app = common::offline_app();
    let token = volink::middleware::create_jwt("vol-1", b"some-other-key").unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/events")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_token_passes_auth() {
    let app = common::offline_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/events")
                .header(header::AUTHORIZATION, common::auth_header("vol-1"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // The offline store errors after auth, so anything but 401 means the
    // token was accepted.
    assert_ne!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_cookie_token_accepted() {
    let app = common::offline_app();
    let token = volink::middleware::create_jwt(
        "vol-1",
        &volink::config::Config::default().jwt_signing_key,
    )
    .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/events")
                .header(header::COOKIE, format!("volink_token={}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_ne!(response.status(), StatusCode::UNAUTHORIZED);
}
