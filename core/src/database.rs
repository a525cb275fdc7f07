/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::{Context, Result};
use chrono::Utc;
use migration::Migrator;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection,
    DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use sea_orm_migration::prelude::*;
use std::time::Duration;
use tracing::log::LevelFilter;
use uuid::Uuid;

use super::consts::{BASE_STATUSES, BASE_TRANSITIONS};
use super::input::format_job_number;
use super::state::load_and_apply_state;
use super::types::*;

pub async fn connect_db(cli: &Cli) -> Result<DatabaseConnection> {
    let db_url = if let Some(file) = &cli.database_url_file {
        std::fs::read_to_string(file)
            .context("Failed to read database url from file")?
            .trim()
            .to_string()
    } else if let Some(url) = &cli.database_url {
        url.clone()
    } else {
        anyhow::bail!("No database url provided")
    };

    let mut opt = ConnectOptions::new(db_url);

    // SQL statements are only logged at debug level
    if cli.log_level == "debug" {
        opt.sqlx_logging(true)
            .sqlx_logging_level(LevelFilter::Debug);
    } else {
        opt.sqlx_logging(false);
    }

    opt.max_connections(50)
        .min_connections(2)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(60));

    let db = Database::connect(opt)
        .await
        .context("Failed to connect to database")?;
    Migrator::up(&db, None)
        .await
        .context("Failed to run database migrations")?;
    update_db(&db).await.context("Failed to update database")?;
    load_and_apply_state(&db, cli.state_file.as_deref(), cli.delete_state)
        .await
        .context("Failed to apply state file")?;
    Ok(db)
}

/// Seeds the default workflow into an empty status table.
pub async fn update_db<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    if EJobStatus::find().one(db).await?.is_some() {
        return Ok(());
    }

    tracing::info!("Seeding default job workflow");
    let now = Utc::now().naive_utc();

    let statuses = BASE_STATUSES.iter().map(|s| AJobStatus {
        id: Set(s.id),
        code: Set(s.code.to_string()),
        title: Set(s.title.to_string()),
        order: Set(s.order),
        system_type: Set(s.system_type),
        color: Set(s.color.to_string()),
        icon: Set(None),
        managed: Set(false),
        created_at: Set(now),
    });

    EJobStatus::insert_many(statuses)
        .exec_without_returning(db)
        .await?;

    let transitions = BASE_TRANSITIONS
        .iter()
        .map(|(from, to)| AJobStatusTransition {
            id: Set(Uuid::new_v4()),
            from_status: Set(*from),
            to_status: Set(*to),
        });

    EJobStatusTransition::insert_many(transitions)
        .exec_without_returning(db)
        .await?;

    Ok(())
}

pub async fn find_active_job<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<MJob>, DbErr> {
    EJob::find_by_id(id)
        .filter(CJob::DeletedAt.is_null())
        .one(db)
        .await
}

pub async fn find_user_by_email<C: ConnectionTrait>(
    db: &C,
    email: &str,
) -> Result<Option<MUser>, DbErr> {
    EUser::find()
        .filter(CUser::Email.eq(email.to_lowercase()))
        .one(db)
        .await
}

/// Lowest ordered standard status, where new jobs start.
pub async fn initial_status<C: ConnectionTrait>(db: &C) -> Result<Option<MJobStatus>, DbErr> {
    EJobStatus::find()
        .filter(CJobStatus::SystemType.eq(entity::job_status::SystemType::Standard))
        .order_by_asc(CJobStatus::Order)
        .one(db)
        .await
}

/// Next number of `job_type`. Call inside the transaction that inserts the
/// job: the job type row stays locked until it commits, so concurrent
/// creators of the same type are numbered one after another.
pub async fn next_job_number<C: ConnectionTrait>(
    db: &C,
    job_type: &MJobType,
) -> Result<String, DbErr> {
    EJobType::find_by_id(job_type.id)
        .lock_exclusive()
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("job type {}", job_type.code)))?;

    let existing = EJob::find()
        .filter(CJob::JobType.eq(job_type.id))
        .count(db)
        .await?;

    Ok(format_job_number(&job_type.code, existing + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity::job_status::SystemType;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::collections::BTreeMap;

    fn status(id: Uuid) -> MJobStatus {
        MJobStatus {
            id,
            code: "received".to_string(),
            title: "Received".to_string(),
            order: 1,
            system_type: SystemType::Standard,
            color: "#94a3b8".to_string(),
            icon: None,
            managed: false,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[tokio::test]
    async fn test_update_db_skips_existing_workflow() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![status(Uuid::new_v4())]])
            .into_connection();

        update_db(&db).await.unwrap();

        let log = format!("{:?}", db.into_transaction_log());
        assert!(!log.contains("INSERT"));
    }

    #[tokio::test]
    async fn test_update_db_seeds_empty_table() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<MJobStatus>::new()])
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: BASE_STATUSES.len() as u64,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: BASE_TRANSITIONS.len() as u64,
                },
            ])
            .into_connection();

        update_db(&db).await.unwrap();

        let log = format!("{:?}", db.into_transaction_log());
        assert_eq!(log.matches("INSERT").count(), 2);
        assert!(log.contains("job_status_transition"));
    }

    #[tokio::test]
    async fn test_next_job_number_locks_job_type() {
        let job_type = MJobType {
            id: Uuid::new_v4(),
            code: "vid".to_string(),
            name: "Video".to_string(),
            color: None,
            managed: false,
            created_at: Utc::now().naive_utc(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![job_type.clone()]])
            .append_query_results([vec![BTreeMap::from([(
                "num_items",
                sea_orm::Value::BigInt(Some(3)),
            )])]])
            .into_connection();

        let number = next_job_number(&db, &job_type).await.unwrap();
        assert_eq!(number, format_job_number("vid", 4));

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("FOR UPDATE"), "{log}");
    }
}
