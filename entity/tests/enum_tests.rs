/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for entity enums

use entity::*;
use std::str::FromStr;

#[test]
fn test_user_role_from_str() {
    assert_eq!(
        user::UserRole::from_str("admin").unwrap(),
        user::UserRole::Admin
    );
    assert_eq!(
        user::UserRole::from_str("Manager").unwrap(),
        user::UserRole::Manager
    );
    assert_eq!(
        user::UserRole::from_str("STAFF").unwrap(),
        user::UserRole::Staff
    );

    assert!(user::UserRole::from_str("owner").is_err());
}

#[test]
fn test_system_type_from_str() {
    assert_eq!(
        job_status::SystemType::from_str("standard").unwrap(),
        job_status::SystemType::Standard
    );
    assert_eq!(
        job_status::SystemType::from_str("TERMINATED").unwrap(),
        job_status::SystemType::Terminated
    );

    assert!(job_status::SystemType::from_str("archived").is_err());
}

#[test]
fn test_system_type_terminal() {
    assert!(!job_status::SystemType::Standard.is_terminal());
    assert!(job_status::SystemType::Completed.is_terminal());
    assert!(job_status::SystemType::Terminated.is_terminal());
}

#[test]
fn test_system_type_serialization() {
    let json = serde_json::to_string(&job_status::SystemType::Completed).unwrap();
    assert_eq!(json, "\"COMPLETED\"");

    let role: user::UserRole = serde_json::from_str("\"manager\"").unwrap();
    assert_eq!(role, user::UserRole::Manager);
}
