/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for configuration and shared response types

use clap::Parser;
use sea_orm::{DatabaseBackend, MockDatabase};
use worktable_core::realtime::Realtime;
use worktable_core::types::*;

#[test]
fn test_cli_defaults() {
    let cli = Cli::parse_from(["worktable-server", "--jwt-secret-file", "/run/secrets/jwt"]);

    assert_eq!(cli.ip, "127.0.0.1");
    assert_eq!(cli.port, 3000);
    assert_eq!(cli.ws_port, 3001);
    assert_eq!(cli.jwt_expiry_hours, 24);
    assert_eq!(cli.jwt_secret_file, "/run/secrets/jwt");
    assert!(cli.strict_transitions);
    assert!(cli.delete_state);
    assert!(!cli.disable_registration);
    assert!(!cli.report_errors);
    assert!(cli.state_file.is_none());
}

#[test]
fn test_cli_flags() {
    let cli = Cli::parse_from([
        "worktable-server",
        "--jwt-secret-file",
        "jwt",
        "--port",
        "8080",
        "--strict-transitions",
        "false",
        "--state-file",
        "studio.json",
    ]);

    assert_eq!(cli.port, 8080);
    assert!(!cli.strict_transitions);
    assert_eq!(cli.state_file.as_deref(), Some("studio.json"));
}

#[test]
fn test_cli_rejects_invalid_values() {
    assert!(
        Cli::try_parse_from(["worktable-server", "--jwt-secret-file", "jwt", "--port", "0"])
            .is_err()
    );
    assert!(
        Cli::try_parse_from([
            "worktable-server",
            "--jwt-secret-file",
            "jwt",
            "--jwt-expiry-hours",
            "0",
        ])
        .is_err()
    );
}

#[test]
fn test_server_state_creation() {
    let cli = Cli::parse_from(["worktable-server", "--jwt-secret-file", "jwt"]);
    let state = ServerState {
        db: MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        cli,
        jwt_secret: "secret".to_string(),
        realtime: Realtime::default(),
    };

    assert_eq!(state.cli.port, 3000);
    assert!(!state.cli.debug);
}

#[test]
fn test_base_response_envelope() {
    let response = BaseResponse::new("Jobs", vec![1, 2, 3]);
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Jobs");
    assert_eq!(json["result"], serde_json::json!([1, 2, 3]));
    assert!(json["timestamp"].is_string());
}
