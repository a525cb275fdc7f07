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
                    .table(User::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(User::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(User::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(User::Name).string().not_null())
                    .col(ColumnDef::new(User::Password).string().not_null())
                    .col(ColumnDef::new(User::Role).integer().not_null())
                    .col(ColumnDef::new(User::Department).uuid())
                    .col(ColumnDef::new(User::JobTitle).string())
                    .col(ColumnDef::new(User::Avatar).string())
                    .col(ColumnDef::new(User::LastLoginAt).date_time().not_null())
                    .col(ColumnDef::new(User::LastActiveAt).date_time().not_null())
                    .col(ColumnDef::new(User::CreatedAt).date_time().not_null())
                    .col(
                        ColumnDef::new(User::Managed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-user-department")
                            .from(User::Table, User::Department)
                            .to(Department::Table, Department::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
    Email,
    Name,
    Password,
    Role,
    Department,
    JobTitle,
    Avatar,
    LastLoginAt,
    LastActiveAt,
    CreatedAt,
    Managed,
}

#[derive(DeriveIden)]
enum Department {
    Table,
    Id,
}
