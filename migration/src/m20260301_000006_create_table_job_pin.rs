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
                    .table(JobPin::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(JobPin::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(JobPin::User).uuid().not_null())
                    .col(ColumnDef::new(JobPin::Job).uuid().not_null())
                    .col(ColumnDef::new(JobPin::CreatedAt).date_time().not_null())
                    .index(
                        Index::create()
                            .name("idx-job_pin-user-job")
                            .col(JobPin::User)
                            .col(JobPin::Job)
                            .unique(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-job_pin-user")
                            .from(JobPin::Table, JobPin::User)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-job_pin-job")
                            .from(JobPin::Table, JobPin::Job)
                            .to(Job::Table, Job::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Comment::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Comment::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Comment::Job).uuid().not_null())
                    .col(ColumnDef::new(Comment::User).uuid().not_null())
                    .col(ColumnDef::new(Comment::Content).text().not_null())
                    .col(ColumnDef::new(Comment::CreatedAt).date_time().not_null())
                    .col(ColumnDef::new(Comment::UpdatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-comment-job")
                            .from(Comment::Table, Comment::Job)
                            .to(Job::Table, Job::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-comment-user")
                            .from(Comment::Table, Comment::User)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Comment::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(JobPin::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum JobPin {
    Table,
    Id,
    User,
    Job,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Comment {
    Table,
    Id,
    Job,
    User,
    Content,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Job {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}
