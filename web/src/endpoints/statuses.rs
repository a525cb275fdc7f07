/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::{ValidJson, WebError, WebResult};
use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use entity::job_status::SystemType;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use worktable_core::input::check_index_name;
use worktable_core::types::*;
use worktable_core::workflow::{self, StatusChange};

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeStatusRequest {
    pub code: String,
    pub title: String,
    pub order: i32,
    pub system_type: SystemType,
    pub color: String,
    pub icon: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PatchStatusRequest {
    pub title: Option<String>,
    pub order: Option<i32>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TransitionRequest {
    pub from_status_id: Uuid,
    pub to_status_id: Uuid,
}

impl From<TransitionRequest> for StatusChange {
    fn from(body: TransitionRequest) -> Self {
        StatusChange {
            from: body.from_status_id,
            to: body.to_status_id,
        }
    }
}

pub async fn get(state: State<Arc<ServerState>>) -> WebResult<Json<BaseResponse<Vec<MJobStatus>>>> {
    let statuses = EJobStatus::find()
        .order_by_asc(CJobStatus::Order)
        .all(&state.db)
        .await?;

    Ok(Json(BaseResponse::new("Job statuses", statuses)))
}

pub async fn post(
    state: State<Arc<ServerState>>,
    ValidJson(body): ValidJson<MakeStatusRequest>,
) -> WebResult<Json<BaseResponse<MJobStatus>>> {
    check_index_name(&body.code).map_err(|e| WebError::invalid_field("code", e))?;

    let existing = EJobStatus::find()
        .filter(CJobStatus::Code.eq(&body.code))
        .one(&state.db)
        .await?;

    if existing.is_some() {
        return Err(WebError::already_exists("Job status"));
    }

    let status = AJobStatus {
        id: Set(Uuid::new_v4()),
        code: Set(body.code),
        title: Set(body.title),
        order: Set(body.order),
        system_type: Set(body.system_type),
        color: Set(body.color),
        icon: Set(body.icon),
        managed: Set(false),
        created_at: Set(Utc::now().naive_utc()),
    }
    .insert(&state.db)
    .await?;

    Ok(Json(BaseResponse::new("Job status created", status)))
}

pub async fn patch_status(
    state: State<Arc<ServerState>>,
    Path(status_id): Path<Uuid>,
    ValidJson(body): ValidJson<PatchStatusRequest>,
) -> WebResult<Json<BaseResponse<MJobStatus>>> {
    let status = EJobStatus::find_by_id(status_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| WebError::not_found("Job status"))?;

    if status.managed {
        return Err(WebError::managed_resource("Job status"));
    }

    let mut astatus = status.into_active_model();

    if let Some(title) = body.title {
        astatus.title = Set(title);
    }

    if let Some(order) = body.order {
        astatus.order = Set(order);
    }

    if let Some(color) = body.color {
        astatus.color = Set(color);
    }

    if let Some(icon) = body.icon {
        astatus.icon = Set(Some(icon));
    }

    let status = astatus.update(&state.db).await?;

    Ok(Json(BaseResponse::new("Job status updated", status)))
}

pub async fn get_next(
    state: State<Arc<ServerState>>,
    Path(status_id): Path<Uuid>,
) -> WebResult<Json<BaseResponse<Vec<MJobStatus>>>> {
    let next = workflow::next_statuses(&state.db, status_id).await?;

    Ok(Json(BaseResponse::new("Next statuses", next)))
}

pub async fn get_transitions(
    state: State<Arc<ServerState>>,
) -> WebResult<Json<BaseResponse<Vec<MJobStatusTransition>>>> {
    let transitions = EJobStatusTransition::find().all(&state.db).await?;

    Ok(Json(BaseResponse::new("Transitions", transitions)))
}

pub async fn put_transition(
    state: State<Arc<ServerState>>,
    ValidJson(body): ValidJson<TransitionRequest>,
) -> WebResult<Json<BaseResponse<MJobStatusTransition>>> {
    let transition = workflow::add_transition(&state.db, body.into()).await?;

    Ok(Json(BaseResponse::new("Transition added", transition)))
}

pub async fn delete_transition(
    state: State<Arc<ServerState>>,
    ValidJson(body): ValidJson<TransitionRequest>,
) -> WebResult<Json<BaseResponse<bool>>> {
    workflow::remove_transition(&state.db, body.into()).await?;

    Ok(Json(BaseResponse::new("Transition removed", true)))
}
