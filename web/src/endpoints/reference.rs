/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Departments, job types and payment channels.

use crate::error::{ValidJson, WebError, WebResult};
use axum::Json;
use axum::extract::{Path, State};
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use worktable_core::input::{check_index_name, validate_display_name};
use worktable_core::types::*;

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeReferenceRequest {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PatchReferenceRequest {
    pub name: Option<String>,
    pub color: Option<String>,
}

fn validate_reference(body: &MakeReferenceRequest) -> WebResult<()> {
    check_index_name(&body.code).map_err(|e| WebError::invalid_field("code", e))?;
    validate_display_name(&body.name).map_err(|e| WebError::invalid_field("name", e))?;
    Ok(())
}

fn validate_name(name: &Option<String>) -> WebResult<()> {
    if let Some(name) = name {
        validate_display_name(name).map_err(|e| WebError::invalid_field("name", e))?;
    }

    Ok(())
}

pub async fn get_departments(
    state: State<Arc<ServerState>>,
) -> WebResult<Json<BaseResponse<Vec<MDepartment>>>> {
    let departments = EDepartment::find()
        .order_by_asc(CDepartment::Name)
        .all(&state.db)
        .await?;

    Ok(Json(BaseResponse::new("Departments", departments)))
}

pub async fn post_department(
    state: State<Arc<ServerState>>,
    ValidJson(body): ValidJson<MakeReferenceRequest>,
) -> WebResult<Json<BaseResponse<MDepartment>>> {
    validate_reference(&body)?;

    let existing = EDepartment::find()
        .filter(CDepartment::Code.eq(&body.code))
        .one(&state.db)
        .await?;

    if existing.is_some() {
        return Err(WebError::already_exists("Department"));
    }

    let department = ADepartment {
        id: Set(Uuid::new_v4()),
        code: Set(body.code),
        name: Set(body.name),
        managed: Set(false),
        created_at: Set(Utc::now().naive_utc()),
    }
    .insert(&state.db)
    .await?;

    Ok(Json(BaseResponse::new("Department created", department)))
}

pub async fn patch_department(
    state: State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
    ValidJson(body): ValidJson<PatchReferenceRequest>,
) -> WebResult<Json<BaseResponse<MDepartment>>> {
    validate_name(&body.name)?;

    let department = EDepartment::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| WebError::not_found("Department"))?;

    if department.managed {
        return Err(WebError::managed_resource("Department"));
    }

    let mut adepartment = department.into_active_model();
    if let Some(name) = body.name {
        adepartment.name = Set(name);
    }

    let department = adepartment.update(&state.db).await?;
    Ok(Json(BaseResponse::new("Department updated", department)))
}

pub async fn get_job_types(
    state: State<Arc<ServerState>>,
) -> WebResult<Json<BaseResponse<Vec<MJobType>>>> {
    let job_types = EJobType::find()
        .order_by_asc(CJobType::Name)
        .all(&state.db)
        .await?;

    Ok(Json(BaseResponse::new("Job types", job_types)))
}

pub async fn post_job_type(
    state: State<Arc<ServerState>>,
    ValidJson(body): ValidJson<MakeReferenceRequest>,
) -> WebResult<Json<BaseResponse<MJobType>>> {
    validate_reference(&body)?;

    let existing = EJobType::find()
        .filter(CJobType::Code.eq(&body.code))
        .one(&state.db)
        .await?;

    if existing.is_some() {
        return Err(WebError::already_exists("Job type"));
    }

    let job_type = AJobType {
        id: Set(Uuid::new_v4()),
        code: Set(body.code),
        name: Set(body.name),
        color: Set(body.color),
        managed: Set(false),
        created_at: Set(Utc::now().naive_utc()),
    }
    .insert(&state.db)
    .await?;

    Ok(Json(BaseResponse::new("Job type created", job_type)))
}

pub async fn patch_job_type(
    state: State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
    ValidJson(body): ValidJson<PatchReferenceRequest>,
) -> WebResult<Json<BaseResponse<MJobType>>> {
    validate_name(&body.name)?;

    let job_type = EJobType::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| WebError::not_found("Job type"))?;

    if job_type.managed {
        return Err(WebError::managed_resource("Job type"));
    }

    let mut ajob_type = job_type.into_active_model();
    if let Some(name) = body.name {
        ajob_type.name = Set(name);
    }
    if let Some(color) = body.color {
        ajob_type.color = Set(Some(color));
    }

    let job_type = ajob_type.update(&state.db).await?;
    Ok(Json(BaseResponse::new("Job type updated", job_type)))
}

pub async fn get_payment_channels(
    state: State<Arc<ServerState>>,
) -> WebResult<Json<BaseResponse<ListResponse>>> {
    let channels = EPaymentChannel::find()
        .order_by_asc(CPaymentChannel::Name)
        .all(&state.db)
        .await?
        .into_iter()
        .map(|c| ListItem {
            id: c.id,
            name: c.name,
        })
        .collect::<ListResponse>();

    Ok(Json(BaseResponse::new("Payment channels", channels)))
}

pub async fn post_payment_channel(
    state: State<Arc<ServerState>>,
    ValidJson(body): ValidJson<MakeReferenceRequest>,
) -> WebResult<Json<BaseResponse<MPaymentChannel>>> {
    validate_reference(&body)?;

    let existing = EPaymentChannel::find()
        .filter(CPaymentChannel::Code.eq(&body.code))
        .one(&state.db)
        .await?;

    if existing.is_some() {
        return Err(WebError::already_exists("Payment channel"));
    }

    let channel = APaymentChannel {
        id: Set(Uuid::new_v4()),
        code: Set(body.code),
        name: Set(body.name),
        managed: Set(false),
        created_at: Set(Utc::now().naive_utc()),
    }
    .insert(&state.db)
    .await?;

    Ok(Json(BaseResponse::new("Payment channel created", channel)))
}

pub async fn patch_payment_channel(
    state: State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
    ValidJson(body): ValidJson<PatchReferenceRequest>,
) -> WebResult<Json<BaseResponse<MPaymentChannel>>> {
    validate_name(&body.name)?;

    let channel = EPaymentChannel::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| WebError::not_found("Payment channel"))?;

    if channel.managed {
        return Err(WebError::managed_resource("Payment channel"));
    }

    let mut achannel = channel.into_active_model();
    if let Some(name) = body.name {
        achannel.name = Set(name);
    }

    let channel = achannel.update(&state.db).await?;
    Ok(Json(BaseResponse::new("Payment channel updated", channel)))
}
