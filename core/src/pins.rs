/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use super::types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinState {
    pub pinned: bool,
    pub total_pinned: usize,
}

/// Pins the job for the user, or unpins it when already pinned.
pub async fn toggle_pin(
    db: &DatabaseConnection,
    user_id: Uuid,
    job_id: Uuid,
) -> Result<PinState, DbErr> {
    let existing = EJobPin::find()
        .filter(
            Condition::all()
                .add(CJobPin::User.eq(user_id))
                .add(CJobPin::Job.eq(job_id)),
        )
        .one(db)
        .await?;

    let pinned = if let Some(pin) = existing {
        EJobPin::delete_by_id(pin.id).exec(db).await?;
        false
    } else {
        let apin = AJobPin {
            id: Set(Uuid::new_v4()),
            user: Set(user_id),
            job: Set(job_id),
            created_at: Set(Utc::now().naive_utc()),
        };

        EJobPin::insert(apin).exec_without_returning(db).await?;
        true
    };

    let total_pinned = pinned_job_ids(db, user_id).await?.len();

    Ok(PinState {
        pinned,
        total_pinned,
    })
}

pub async fn pinned_job_ids(db: &DatabaseConnection, user_id: Uuid) -> Result<HashSet<Uuid>, DbErr> {
    Ok(EJobPin::find()
        .filter(CJobPin::User.eq(user_id))
        .all(db)
        .await?
        .into_iter()
        .map(|p| p.job)
        .collect())
}

pub async fn pinned_jobs(db: &DatabaseConnection, user_id: Uuid) -> Result<Vec<MJob>, DbErr> {
    let ids = pinned_job_ids(db, user_id).await?;

    if ids.is_empty() {
        return Ok(vec![]);
    }

    EJob::find()
        .filter(CJob::Id.is_in(ids))
        .filter(CJob::DeletedAt.is_null())
        .order_by_desc(CJob::CreatedAt)
        .all(db)
        .await
}
