/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_table_department;
mod m20260301_000002_create_table_user;
mod m20260301_000003_create_table_job_type;
mod m20260301_000004_create_table_job_status;
mod m20260301_000005_create_table_job;
mod m20260301_000006_create_table_job_pin;
mod m20260301_000007_create_table_notification;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_table_department::Migration),
            Box::new(m20260301_000002_create_table_user::Migration),
            Box::new(m20260301_000003_create_table_job_type::Migration),
            Box::new(m20260301_000004_create_table_job_status::Migration),
            Box::new(m20260301_000005_create_table_job::Migration),
            Box::new(m20260301_000006_create_table_job_pin::Migration),
            Box::new(m20260301_000007_create_table_notification::Migration),
        ]
    }
}
