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
                    .table(JobType::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(JobType::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(JobType::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(JobType::Name).string().not_null())
                    .col(ColumnDef::new(JobType::Color).string())
                    .col(
                        ColumnDef::new(JobType::Managed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(JobType::CreatedAt).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PaymentChannel::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PaymentChannel::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PaymentChannel::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(PaymentChannel::Name).string().not_null())
                    .col(
                        ColumnDef::new(PaymentChannel::Managed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(PaymentChannel::CreatedAt)
                            .date_time()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PaymentChannel::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(JobType::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum JobType {
    Table,
    Id,
    Code,
    Name,
    Color,
    Managed,
    CreatedAt,
}

#[derive(DeriveIden)]
enum PaymentChannel {
    Table,
    Id,
    Code,
    Name,
    Managed,
    CreatedAt,
}
