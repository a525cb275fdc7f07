/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

mod common;

use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderValue, StatusCode};
use entity::user::UserRole;
use serde_json::{Value, json};
use web::endpoints::auth::*;
use worktable_core::types::MUser;

#[test]
fn test_make_user_request_serialization() {
    let request = MakeUserRequest {
        email: "test@example.com".to_string(),
        name: "Test User".to_string(),
        password: "password123".to_string(),
    };

    let json = serde_json::to_string(&request).unwrap();
    assert!(json.contains("Test User"));
    assert!(json.contains("test@example.com"));
}

#[tokio::test]
async fn test_register_twice_conflicts() {
    let user = common::mock_user(UserRole::Staff);
    let db = common::mock_db()
        .append_query_results([Vec::<MUser>::new()])
        .append_query_results([vec![user.clone()]])
        .append_query_results([vec![user]]);
    let server = common::server(common::create_mock_state(db));

    let body = json!({
        "email": "alex@studio.test",
        "name": "Alex",
        "password": "correct-horse-42",
    });

    let first = server.post("/api/v1/auth/register").json(&body).await;
    assert_eq!(first.status_code(), StatusCode::OK);
    let first = first.json::<Value>();
    assert_eq!(first["success"], true);
    assert!(first["result"]["access_token"].as_str().is_some());

    let second = server.post("/api/v1/auth/register").json(&body).await;
    assert_eq!(second.status_code(), StatusCode::CONFLICT);
    let second = second.json::<Value>();
    assert_eq!(second["success"], false);
    assert_eq!(second["error"], "Conflict");
}

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    let server = common::server(common::create_mock_state(common::mock_db()));

    let response = server
        .post("/api/v1/auth/register")
        .json(&json!({
            "email": "not-an-email",
            "name": "Alex",
            "password": "correct-horse-42",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert!(body["message"].is_array());
    assert_eq!(body["error"], "Bad Request");
}

#[tokio::test]
async fn test_login_unknown_email_is_unauthorized() {
    let db = common::mock_db().append_query_results([Vec::<MUser>::new()]);
    let server = common::server(common::create_mock_state(db));

    let response = server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": "nobody@studio.test", "password": "whatever1" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_returns_current_user_without_password() {
    let user = common::mock_user(UserRole::Manager);
    let db = common::mock_db().append_query_results([vec![user.clone()]]);
    let state = common::create_mock_state(db);
    let token = common::bearer(&state, &user);
    let server = common::server(state);

    let response = server
        .get("/api/v1/auth/me")
        .add_header(AUTHORIZATION, HeaderValue::from_str(&token).unwrap())
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["result"]["email"], "alex@studio.test");
    assert_eq!(body["result"]["role"], "manager");
    assert!(body["result"].get("password").is_none());
}

#[tokio::test]
async fn test_bad_token_is_unauthorized() {
    let server = common::server(common::create_mock_state(common::mock_db()));

    let response = server
        .get("/api/v1/auth/me")
        .add_header(AUTHORIZATION, HeaderValue::from_static("Bearer garbage"))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
