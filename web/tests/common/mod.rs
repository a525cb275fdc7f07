/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

#![allow(dead_code)]

use axum_test::TestServer;
use chrono::Utc;
use entity::user::UserRole;
use sea_orm::{DatabaseBackend, MockDatabase};
use std::sync::Arc;
use uuid::Uuid;
use worktable_core::realtime::Realtime;
use worktable_core::types::*;

pub fn create_mock_cli() -> Cli {
    Cli {
        log_level: "info".to_string(),
        log_json: false,
        debug: true,
        ip: "127.0.0.1".to_string(),
        port: 3000,
        ws_port: 3001,
        serve_url: "http://127.0.0.1:8000".to_string(),
        database_url: Some("mock://test".to_string()),
        database_url_file: None,
        jwt_secret_file: "test_jwt".to_string(),
        jwt_expiry_hours: 24,
        disable_registration: false,
        strict_transitions: true,
        state_file: None,
        delete_state: true,
        report_errors: false,
    }
}

pub fn create_mock_state(db: MockDatabase) -> Arc<ServerState> {
    Arc::new(ServerState {
        db: db.into_connection(),
        cli: create_mock_cli(),
        jwt_secret: "integration-test-secret".to_string(),
        realtime: Realtime::default(),
    })
}

pub fn mock_db() -> MockDatabase {
    MockDatabase::new(DatabaseBackend::Postgres)
}

pub fn mock_user(role: UserRole) -> MUser {
    let now = Utc::now().naive_utc();

    MUser {
        id: Uuid::new_v4(),
        email: "alex@studio.test".to_string(),
        name: "Alex".to_string(),
        password: "not-a-real-hash".to_string(),
        role,
        department: None,
        job_title: None,
        avatar: None,
        last_login_at: now,
        last_active_at: now,
        created_at: now,
        managed: false,
    }
}

pub fn server(state: Arc<ServerState>) -> TestServer {
    let router = web::create_router(state).unwrap();
    TestServer::new(router).unwrap()
}

/// SQL the handlers ran, available once the server is dropped.
pub fn transaction_log(server: TestServer, state: Arc<ServerState>) -> String {
    drop(server);

    match Arc::try_unwrap(state) {
        Ok(state) => format!("{:?}", state.db.into_transaction_log()),
        Err(_) => panic!("server state is still shared"),
    }
}

pub fn bearer(state: &ServerState, user: &MUser) -> String {
    format!(
        "Bearer {}",
        web::authorization::encode_jwt(state, user.id).unwrap()
    )
}
