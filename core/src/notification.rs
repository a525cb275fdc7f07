/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use super::consts::EVENT_RECEIVED_MESSAGE;
use super::realtime::Realtime;
use super::types::*;

/// Stores a notification and pushes it to every open socket of the user.
pub async fn notify(
    db: &DatabaseConnection,
    realtime: &Realtime,
    user_id: Uuid,
    title: String,
    content: String,
) -> Result<MNotification, DbErr> {
    let notification = ANotification {
        id: Set(Uuid::new_v4()),
        user: Set(user_id),
        title: Set(title),
        content: Set(content),
        is_read: Set(false),
        created_at: Set(Utc::now().naive_utc()),
    }
    .insert(db)
    .await?;

    let delivered = realtime
        .emit_to_user(user_id, EVENT_RECEIVED_MESSAGE, notification.clone())
        .await;
    tracing::debug!(user = %user_id, delivered, "Notification pushed");

    Ok(notification)
}

pub async fn list_notifications(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<MNotification>, DbErr> {
    ENotification::find()
        .filter(CNotification::User.eq(user_id))
        .order_by_desc(CNotification::CreatedAt)
        .all(db)
        .await
}

pub async fn mark_read(
    db: &DatabaseConnection,
    user_id: Uuid,
    notification_id: Uuid,
) -> Result<Option<MNotification>, DbErr> {
    let Some(notification) = ENotification::find()
        .filter(
            Condition::all()
                .add(CNotification::Id.eq(notification_id))
                .add(CNotification::User.eq(user_id)),
        )
        .one(db)
        .await?
    else {
        return Ok(None);
    };

    if notification.is_read {
        return Ok(Some(notification));
    }

    let mut anotification = notification.into_active_model();
    anotification.is_read = Set(true);
    Ok(Some(anotification.update(db).await?))
}
