/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(JobStatus::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(JobStatus::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(JobStatus::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(JobStatus::Title).string().not_null())
                    .col(ColumnDef::new(JobStatus::Order).integer().not_null())
                    .col(ColumnDef::new(JobStatus::SystemType).integer().not_null())
                    .col(ColumnDef::new(JobStatus::Color).string().not_null())
                    .col(ColumnDef::new(JobStatus::Icon).string())
                    .col(
                        ColumnDef::new(JobStatus::Managed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(JobStatus::CreatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(JobStatusTransition::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(JobStatusTransition::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(JobStatusTransition::FromStatus)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JobStatusTransition::ToStatus)
                            .uuid()
                            .not_null(),
                    )
                    .index(
                        Index::create()
                            .name("idx-job_status_transition-edge")
                            .col(JobStatusTransition::FromStatus)
                            .col(JobStatusTransition::ToStatus)
                            .unique(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-job_status_transition-from_status")
                            .from(JobStatusTransition::Table, JobStatusTransition::FromStatus)
                            .to(JobStatus::Table, JobStatus::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-job_status_transition-to_status")
                            .from(JobStatusTransition::Table, JobStatusTransition::ToStatus)
                            .to(JobStatus::Table, JobStatus::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(JobStatusTransition::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(JobStatus::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum JobStatus {
    Table,
    Id,
    Code,
    Title,
    Order,
    SystemType,
    Color,
    Icon,
    Managed,
    CreatedAt,
}

#[derive(DeriveIden)]
enum JobStatusTransition {
    Table,
    Id,
    FromStatus,
    ToStatus,
}
