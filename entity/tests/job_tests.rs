/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for job and job status entities

use chrono::NaiveDate;
use entity::*;
use sea_orm::{DatabaseBackend, MockDatabase, entity::prelude::*};
use uuid::Uuid;

fn naive_date() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

#[tokio::test]
async fn test_job_entity_with_status() -> Result<(), DbErr> {
    let job_id = Uuid::new_v4();
    let status_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![(
            job::Model {
                id: job_id,
                number: "VID-0001".to_owned(),
                display_name: "Launch trailer".to_owned(),
                client_name: "Acme".to_owned(),
                description: String::new(),
                income_cost: 1200.0,
                staff_cost: 400.0,
                is_priority: true,
                is_paid: false,
                is_published: false,
                status: status_id,
                job_type: Uuid::new_v4(),
                payment_channel: None,
                created_by: Uuid::new_v4(),
                due_at: Some(naive_date()),
                started_at: None,
                completed_at: None,
                deleted_at: None,
                created_at: naive_date(),
                updated_at: naive_date(),
            },
            job_status::Model {
                id: status_id,
                code: "in-progress".to_owned(),
                title: "In progress".to_owned(),
                order: 2,
                system_type: job_status::SystemType::Standard,
                color: "#3b82f6".to_owned(),
                icon: None,
                managed: false,
                created_at: naive_date(),
            },
        )]])
        .into_connection();

    let result = job::Entity::find_by_id(job_id)
        .find_also_related(job_status::Entity)
        .one(&db)
        .await?;

    let (job, status) = result.unwrap();
    assert_eq!(job.number, "VID-0001");
    assert_eq!(job.status, status_id);

    let status = status.unwrap();
    assert_eq!(status.order, 2);
    assert_eq!(status.system_type, job_status::SystemType::Standard);

    Ok(())
}

#[tokio::test]
async fn test_activity_log_entity() -> Result<(), DbErr> {
    let job_id = Uuid::new_v4();
    let from = Uuid::new_v4();
    let to = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![job_activity_log::Model {
            id: Uuid::new_v4(),
            job: job_id,
            field_name: "status".to_owned(),
            previous_value: from.to_string(),
            current_value: to.to_string(),
            modified_by: Uuid::new_v4(),
            modified_at: naive_date(),
        }]])
        .into_connection();

    let logs = job_activity_log::Entity::find()
        .filter(job_activity_log::Column::Job.eq(job_id))
        .all(&db)
        .await?;

    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].previous_value, from.to_string());
    assert_eq!(logs[0].current_value, to.to_string());

    Ok(())
}
