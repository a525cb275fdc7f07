/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::authorization::ensure_permission;
use crate::error::{ValidJson, WebError, WebResult};
use axum::extract::{Path, State};
use axum::{Extension, Json};
use entity::user::UserRole;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, QueryOrder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use worktable_core::input::check_index_name;
use worktable_core::permission::Permission;
use worktable_core::types::*;
use worktable_core::user_config::{get_by_code, update_by_code};

#[derive(Serialize, Deserialize, Debug)]
pub struct PatchRoleRequest {
    pub role: UserRole,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PutConfigRequest {
    pub value: String,
}

pub async fn get(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
) -> WebResult<Json<BaseResponse<Vec<MUser>>>> {
    ensure_permission(&user, Permission::ManageUsers)?;

    let users = EUser::find()
        .order_by_asc(CUser::Name)
        .all(&state.db)
        .await?;

    Ok(Json(BaseResponse::new("Users", users)))
}

pub async fn patch_role(
    state: State<Arc<ServerState>>,
    Path(user_id): Path<Uuid>,
    ValidJson(body): ValidJson<PatchRoleRequest>,
) -> WebResult<Json<BaseResponse<MUser>>> {
    let target = EUser::find_by_id(user_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| WebError::not_found("User"))?;

    if target.managed {
        return Err(WebError::managed_resource("User"));
    }

    let mut auser = target.into_active_model();
    auser.role = Set(body.role);
    let target = auser.update(&state.db).await?;

    tracing::info!(user = %target.id, role = ?target.role, "User role changed");
    Ok(Json(BaseResponse::new("Role updated", target)))
}

pub async fn get_online(
    state: State<Arc<ServerState>>,
) -> WebResult<Json<BaseResponse<Vec<Uuid>>>> {
    let online = state.realtime.presence.online_users().await;

    Ok(Json(BaseResponse::new("Online users", online)))
}

pub async fn get_config(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(code): Path<String>,
) -> WebResult<Json<BaseResponse<MUserConfig>>> {
    let config = get_by_code(&state.db, user.id, &code)
        .await?
        .ok_or_else(|| WebError::not_found("Config"))?;

    Ok(Json(BaseResponse::new("Config", config)))
}

pub async fn put_config(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(code): Path<String>,
    ValidJson(body): ValidJson<PutConfigRequest>,
) -> WebResult<Json<BaseResponse<MUserConfig>>> {
    check_index_name(&code).map_err(|e| WebError::invalid_field("code", e))?;

    let config = update_by_code(&state.db, user.id, &code, body.value).await?;

    Ok(Json(BaseResponse::new("Config saved", config)))
}
