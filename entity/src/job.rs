/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "job")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub number: String,
    pub display_name: String,
    pub client_name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub income_cost: f64,
    pub staff_cost: f64,
    pub is_priority: bool,
    pub is_paid: bool,
    pub is_published: bool,
    pub status: Uuid,
    pub job_type: Uuid,
    pub payment_channel: Option<Uuid>,
    pub created_by: Uuid,
    pub due_at: Option<NaiveDateTime>,
    pub started_at: Option<NaiveDateTime>,
    pub completed_at: Option<NaiveDateTime>,
    pub deleted_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::job_status::Entity",
        from = "Column::Status",
        to = "super::job_status::Column::Id"
    )]
    Status,
    #[sea_orm(
        belongs_to = "super::job_type::Entity",
        from = "Column::JobType",
        to = "super::job_type::Column::Id"
    )]
    JobType,
    #[sea_orm(
        belongs_to = "super::payment_channel::Entity",
        from = "Column::PaymentChannel",
        to = "super::payment_channel::Column::Id"
    )]
    PaymentChannel,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id"
    )]
    CreatedBy,
    #[sea_orm(has_many = "super::job_assignee::Entity")]
    Assignee,
    #[sea_orm(has_many = "super::job_activity_log::Entity")]
    ActivityLog,
}

impl Related<super::job_status::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Status.def()
    }
}

impl Related<super::job_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JobType.def()
    }
}

impl Related<super::job_assignee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignee.def()
    }
}

impl Related<super::job_activity_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActivityLog.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
