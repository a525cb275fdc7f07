/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for user entity

use chrono::NaiveDate;
use entity::*;
use sea_orm::{DatabaseBackend, MockDatabase, entity::prelude::*};
use uuid::Uuid;

#[tokio::test]
async fn test_user_entity_serialization_hides_password() -> Result<(), DbErr> {
    let user_id = Uuid::new_v4();
    let naive_date = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user::Model {
            id: user_id,
            email: "editor@studio.test".to_owned(),
            name: "Editor".to_owned(),
            password: "hashed_password".to_owned(),
            role: user::UserRole::Staff,
            department: None,
            job_title: Some("Video editor".to_owned()),
            avatar: None,
            last_login_at: naive_date,
            last_active_at: naive_date,
            created_at: naive_date,
            managed: false,
        }]])
        .into_connection();

    let user = user::Entity::find_by_id(user_id).one(&db).await?.unwrap();
    assert_eq!(user.email, "editor@studio.test");
    assert_eq!(user.role, user::UserRole::Staff);

    let json = serde_json::to_string(&user).unwrap();
    assert!(!json.contains("hashed_password"));
    assert!(json.contains("\"role\":\"staff\""));

    Ok(())
}
