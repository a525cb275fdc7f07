/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

mod common;

use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderValue, StatusCode};
use chrono::Utc;
use entity::job_status::SystemType;
use entity::user::UserRole;
use sea_orm::MockExecResult;
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;
use worktable_core::consts::{BASE_STATUS_IN_PROGRESS_ID, BASE_STATUS_RECEIVED_ID};
use worktable_core::types::*;

fn mock_job(created_by: Uuid) -> MJob {
    let now = Utc::now().naive_utc();

    MJob {
        id: Uuid::new_v4(),
        number: "PH-0001".to_string(),
        display_name: "Spring lookbook".to_string(),
        client_name: "Atelier Nord".to_string(),
        description: String::new(),
        income_cost: 1200.0,
        staff_cost: 300.0,
        is_priority: false,
        is_paid: false,
        is_published: false,
        status: BASE_STATUS_RECEIVED_ID,
        job_type: Uuid::new_v4(),
        payment_channel: None,
        created_by,
        due_at: None,
        started_at: None,
        completed_at: None,
        deleted_at: None,
        created_at: now,
        updated_at: now,
    }
}

fn auth_header(state: &ServerState, user: &MUser) -> HeaderValue {
    HeaderValue::from_str(&common::bearer(state, user)).unwrap()
}

#[tokio::test]
async fn test_change_status_of_unknown_job_is_not_found() {
    let user = common::mock_user(UserRole::Staff);
    let db = common::mock_db()
        .append_query_results([vec![user.clone()]])
        .append_query_results([Vec::<MJob>::new()]);
    let state = common::create_mock_state(db);
    let header = auth_header(&state, &user);
    let server = common::server(Arc::clone(&state));

    let response = server
        .patch(&format!("/api/v1/jobs/{}/change-status", Uuid::new_v4()))
        .add_header(AUTHORIZATION, header)
        .json(&json!({
            "from_status_id": BASE_STATUS_RECEIVED_ID,
            "to_status_id": BASE_STATUS_IN_PROGRESS_ID,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body = response.json::<Value>();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Not Found");

    let log = common::transaction_log(server, state);
    assert!(!log.contains("INSERT"), "{log}");
    assert!(!log.contains("UPDATE"), "{log}");
}

#[tokio::test]
async fn test_create_job_with_unknown_member_is_not_found() {
    let user = common::mock_user(UserRole::Staff);
    let job_type = MJobType {
        id: Uuid::new_v4(),
        code: "ph".to_string(),
        name: "Photo".to_string(),
        color: None,
        managed: false,
        created_at: Utc::now().naive_utc(),
    };
    let received = MJobStatus {
        id: BASE_STATUS_RECEIVED_ID,
        code: "received".to_string(),
        title: "Received".to_string(),
        order: 1,
        system_type: SystemType::Standard,
        color: "#94a3b8".to_string(),
        icon: None,
        managed: false,
        created_at: Utc::now().naive_utc(),
    };
    let member = common::mock_user(UserRole::Staff);

    let db = common::mock_db()
        .append_query_results([vec![user.clone()]])
        .append_query_results([vec![job_type.clone()]])
        .append_query_results([vec![received]])
        .append_query_results([vec![member.clone()]]);
    let state = common::create_mock_state(db);
    let header = auth_header(&state, &user);
    let server = common::server(Arc::clone(&state));

    let response = server
        .post("/api/v1/jobs")
        .add_header(AUTHORIZATION, header)
        .json(&json!({
            "display_name": "Spring lookbook",
            "client_name": "Atelier Nord",
            "job_type_id": job_type.id,
            "member_ids": [member.id, Uuid::new_v4()],
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body = response.json::<Value>();
    assert_eq!(body["success"], false);

    let log = common::transaction_log(server, state);
    assert!(!log.contains("INSERT"), "{log}");
}

#[tokio::test]
async fn test_missing_authorization_header_is_forbidden() {
    let server = common::server(common::create_mock_state(common::mock_db()));

    let response = server.get("/api/v1/jobs").await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_tab_is_bad_request() {
    let user = common::mock_user(UserRole::Staff);
    let db = common::mock_db().append_query_results([vec![user.clone()]]);
    let state = common::create_mock_state(db);
    let header = auth_header(&state, &user);
    let server = common::server(state);

    let response = server
        .get("/api/v1/jobs?tab=archived")
        .add_header(AUTHORIZATION, header)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_toggle_pin_reports_total() {
    let user = common::mock_user(UserRole::Staff);
    let job = mock_job(user.id);
    let pin = MJobPin {
        id: Uuid::new_v4(),
        user: user.id,
        job: job.id,
        created_at: Utc::now().naive_utc(),
    };

    let db = common::mock_db()
        .append_query_results([vec![user.clone()]])
        .append_query_results([vec![job.clone()]])
        .append_query_results([Vec::<MJobPin>::new()])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .append_query_results([vec![pin]]);
    let state = common::create_mock_state(db);
    let header = auth_header(&state, &user);
    let server = common::server(state);

    let response = server
        .post(&format!("/api/v1/jobs/{}/toggle-pin", job.id))
        .add_header(AUTHORIZATION, header)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["result"]["pinned"], true);
    assert_eq!(body["result"]["total_pinned"], 1);
}

#[tokio::test]
async fn test_staff_cannot_edit_transitions() {
    let user = common::mock_user(UserRole::Staff);
    let db = common::mock_db().append_query_results([vec![user.clone()]]);
    let state = common::create_mock_state(db);
    let header = auth_header(&state, &user);
    let server = common::server(state);

    let response = server
        .put("/api/v1/job-statuses/transitions")
        .add_header(AUTHORIZATION, header)
        .json(&json!({
            "from_status_id": BASE_STATUS_RECEIVED_ID,
            "to_status_id": BASE_STATUS_IN_PROGRESS_ID,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}
