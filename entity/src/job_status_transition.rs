/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One allowed edge of the status workflow.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "job_status_transition")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub from_status: Uuid,
    pub to_status: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    FromStatus,
    ToStatus,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::FromStatus => Entity::belongs_to(super::job_status::Entity)
                .from(Column::FromStatus)
                .to(super::job_status::Column::Id)
                .into(),
            Self::ToStatus => Entity::belongs_to(super::job_status::Entity)
                .from(Column::ToStatus)
                .to(super::job_status::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
