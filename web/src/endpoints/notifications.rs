/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::{WebError, WebResult};
use axum::extract::{Path, State};
use axum::{Extension, Json};
use std::sync::Arc;
use uuid::Uuid;
use worktable_core::notification::{list_notifications, mark_read};
use worktable_core::types::*;

pub async fn get(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
) -> WebResult<Json<BaseResponse<Vec<MNotification>>>> {
    let notifications = list_notifications(&state.db, user.id).await?;

    Ok(Json(BaseResponse::new("Notifications", notifications)))
}

pub async fn patch_read(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(notification_id): Path<Uuid>,
) -> WebResult<Json<BaseResponse<MNotification>>> {
    let notification = mark_read(&state.db, user.id, notification_id)
        .await?
        .ok_or_else(|| WebError::not_found("Notification"))?;

    Ok(Json(BaseResponse::new("Notification read", notification)))
}
