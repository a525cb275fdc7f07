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
                    .table(Job::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Job::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Job::Number).string().not_null().unique_key())
                    .col(ColumnDef::new(Job::DisplayName).string().not_null())
                    .col(ColumnDef::new(Job::ClientName).string().not_null())
                    .col(ColumnDef::new(Job::Description).text().not_null())
                    .col(
                        ColumnDef::new(Job::IncomeCost)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Job::StaffCost)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Job::IsPriority)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Job::IsPaid)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Job::IsPublished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Job::Status).uuid().not_null())
                    .col(ColumnDef::new(Job::JobType).uuid().not_null())
                    .col(ColumnDef::new(Job::PaymentChannel).uuid())
                    .col(ColumnDef::new(Job::CreatedBy).uuid().not_null())
                    .col(ColumnDef::new(Job::DueAt).date_time())
                    .col(ColumnDef::new(Job::StartedAt).date_time())
                    .col(ColumnDef::new(Job::CompletedAt).date_time())
                    .col(ColumnDef::new(Job::DeletedAt).date_time())
                    .col(ColumnDef::new(Job::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Job::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-job-status")
                            .from(Job::Table, Job::Status)
                            .to(JobStatus::Table, JobStatus::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-job-job_type")
                            .from(Job::Table, Job::JobType)
                            .to(JobType::Table, JobType::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-job-payment_channel")
                            .from(Job::Table, Job::PaymentChannel)
                            .to(PaymentChannel::Table, PaymentChannel::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-job-created_by")
                            .from(Job::Table, Job::CreatedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(JobAssignee::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(JobAssignee::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(JobAssignee::Job).uuid().not_null())
                    .col(ColumnDef::new(JobAssignee::User).uuid().not_null())
                    .index(
                        Index::create()
                            .name("idx-job_assignee-job-user")
                            .col(JobAssignee::Job)
                            .col(JobAssignee::User)
                            .unique(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-job_assignee-job")
                            .from(JobAssignee::Table, JobAssignee::Job)
                            .to(Job::Table, Job::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-job_assignee-user")
                            .from(JobAssignee::Table, JobAssignee::User)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(JobActivityLog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(JobActivityLog::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(JobActivityLog::Job).uuid().not_null())
                    .col(ColumnDef::new(JobActivityLog::FieldName).string().not_null())
                    .col(
                        ColumnDef::new(JobActivityLog::PreviousValue)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JobActivityLog::CurrentValue)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(JobActivityLog::ModifiedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(JobActivityLog::ModifiedAt)
                            .date_time()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-job_activity_log-job")
                            .from(JobActivityLog::Table, JobActivityLog::Job)
                            .to(Job::Table, Job::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-job_activity_log-modified_by")
                            .from(JobActivityLog::Table, JobActivityLog::ModifiedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(JobActivityLog::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(JobAssignee::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Job::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Job {
    Table,
    Id,
    Number,
    DisplayName,
    ClientName,
    Description,
    IncomeCost,
    StaffCost,
    IsPriority,
    IsPaid,
    IsPublished,
    Status,
    JobType,
    PaymentChannel,
    CreatedBy,
    DueAt,
    StartedAt,
    CompletedAt,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum JobAssignee {
    Table,
    Id,
    Job,
    User,
}

#[derive(DeriveIden)]
enum JobActivityLog {
    Table,
    Id,
    Job,
    FieldName,
    PreviousValue,
    CurrentValue,
    ModifiedBy,
    ModifiedAt,
}

#[derive(DeriveIden)]
enum JobStatus {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum JobType {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum PaymentChannel {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}
