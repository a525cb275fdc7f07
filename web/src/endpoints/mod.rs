/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod auth;
pub mod jobs;
pub mod notifications;
pub mod reference;
pub mod statuses;
pub mod users;

use crate::error::{WebError, WebResult};
use axum::extract::Json;
use worktable_core::types::BaseResponse;

pub async fn handle_404() -> WebError {
    WebError::NotFound("Not Found".to_string())
}

pub async fn get_health() -> WebResult<Json<BaseResponse<String>>> {
    Ok(Json(BaseResponse::new("200 ALIVE", "200 ALIVE".to_string())))
}
