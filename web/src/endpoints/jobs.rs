/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::authorization::ensure_permission;
use crate::error::{ValidJson, WebError, WebResult};
use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use chrono::{NaiveDateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use worktable_core::database::{find_active_job, initial_status, next_job_number};
use worktable_core::input::{validate_cost, validate_display_name};
use worktable_core::notification::notify;
use worktable_core::permission::Permission;
use worktable_core::pins::{PinState, pinned_jobs, toggle_pin};
use worktable_core::tabs::{JobPage, JobQuery, list_jobs};
use worktable_core::types::*;
use worktable_core::workflow::{self, StatusChange, WorkflowError};

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeJobRequest {
    pub display_name: String,
    pub client_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub income_cost: f64,
    #[serde(default)]
    pub staff_cost: f64,
    #[serde(default)]
    pub is_priority: bool,
    pub job_type_id: Uuid,
    pub payment_channel_id: Option<Uuid>,
    pub status_id: Option<Uuid>,
    pub due_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub member_ids: Vec<Uuid>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct PatchJobRequest {
    pub display_name: Option<String>,
    pub client_name: Option<String>,
    pub description: Option<String>,
    pub income_cost: Option<f64>,
    pub staff_cost: Option<f64>,
    pub is_priority: Option<bool>,
    pub is_paid: Option<bool>,
    pub is_published: Option<bool>,
    pub payment_channel_id: Option<Uuid>,
    pub due_at: Option<NaiveDateTime>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ChangeStatusRequest {
    pub from_status_id: Uuid,
    pub to_status_id: Uuid,
}

/// Both fields hold JSON encoded arrays of user ids.
#[derive(Serialize, Deserialize, Debug)]
pub struct AssignMemberRequest {
    pub prev_member_ids: String,
    pub update_member_ids: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeCommentRequest {
    pub content: String,
}

#[derive(Serialize, Debug)]
pub struct JobDetail {
    #[serde(flatten)]
    pub job: MJob,
    pub status_detail: Option<MJobStatus>,
    pub assignees: Vec<MUser>,
}

async fn load_job(state: &ServerState, id: Uuid) -> WebResult<MJob> {
    find_active_job(&state.db, id)
        .await?
        .ok_or_else(|| WebError::not_found("Job"))
}

pub async fn get(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Query(query): Query<JobQuery>,
) -> WebResult<Json<BaseResponse<JobPage>>> {
    ensure_permission(&user, Permission::ViewJobs)?;

    let tab = query.tab().map_err(WebError::BadRequest)?;
    let page = list_jobs(&state.db, &query, tab, Utc::now().naive_utc()).await?;

    Ok(Json(BaseResponse::new("Jobs", page)))
}

pub async fn post(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    ValidJson(body): ValidJson<MakeJobRequest>,
) -> WebResult<Json<BaseResponse<MJob>>> {
    ensure_permission(&user, Permission::EditJobs)?;

    validate_display_name(&body.display_name)
        .map_err(|e| WebError::invalid_field("display_name", e))?;
    validate_display_name(&body.client_name)
        .map_err(|e| WebError::invalid_field("client_name", e))?;
    validate_cost(body.income_cost).map_err(|e| WebError::invalid_field("income_cost", e))?;
    validate_cost(body.staff_cost).map_err(|e| WebError::invalid_field("staff_cost", e))?;

    let txn = state.db.begin().await?;

    let job_type = EJobType::find_by_id(body.job_type_id)
        .one(&txn)
        .await?
        .ok_or_else(|| WebError::not_found("Job type"))?;

    if let Some(channel) = body.payment_channel_id {
        EPaymentChannel::find_by_id(channel)
            .one(&txn)
            .await?
            .ok_or_else(|| WebError::not_found("Payment channel"))?;
    }

    let status = match body.status_id {
        Some(id) => EJobStatus::find_by_id(id).one(&txn).await?,
        None => initial_status(&txn).await?,
    }
    .ok_or_else(|| WebError::not_found("Job status"))?;

    let mut member_ids = body.member_ids.clone();
    member_ids.sort();
    member_ids.dedup();
    workflow::ensure_members_exist(&txn, &member_ids).await?;

    let now = Utc::now().naive_utc();
    let job = AJob {
        id: Set(Uuid::new_v4()),
        number: Set(next_job_number(&txn, &job_type).await?),
        display_name: Set(body.display_name.clone()),
        client_name: Set(body.client_name.clone()),
        description: Set(body.description.clone()),
        income_cost: Set(body.income_cost),
        staff_cost: Set(body.staff_cost),
        is_priority: Set(body.is_priority),
        is_paid: Set(false),
        is_published: Set(false),
        status: Set(status.id),
        job_type: Set(job_type.id),
        payment_channel: Set(body.payment_channel_id),
        created_by: Set(user.id),
        due_at: Set(body.due_at),
        started_at: Set(None),
        completed_at: Set(None),
        deleted_at: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&txn)
    .await?;

    if !member_ids.is_empty() {
        let assignees = member_ids.iter().map(|member| AJobAssignee {
            id: Set(Uuid::new_v4()),
            job: Set(job.id),
            user: Set(*member),
        });

        EJobAssignee::insert_many(assignees)
            .exec_without_returning(&txn)
            .await?;
    }

    txn.commit().await?;

    tracing::info!(job = %job.id, number = %job.number, "Job created");
    Ok(Json(BaseResponse::new("Job created", job)))
}

pub async fn get_job(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(job_id): Path<Uuid>,
) -> WebResult<Json<BaseResponse<JobDetail>>> {
    ensure_permission(&user, Permission::ViewJobs)?;

    let job = load_job(&state, job_id).await?;
    let status_detail = EJobStatus::find_by_id(job.status).one(&state.db).await?;

    let member_ids = EJobAssignee::find()
        .filter(CJobAssignee::Job.eq(job.id))
        .all(&state.db)
        .await?
        .into_iter()
        .map(|a| a.user)
        .collect::<Vec<Uuid>>();

    let assignees = if member_ids.is_empty() {
        vec![]
    } else {
        EUser::find()
            .filter(CUser::Id.is_in(member_ids))
            .order_by_asc(CUser::Name)
            .all(&state.db)
            .await?
    };

    Ok(Json(BaseResponse::new(
        "Job",
        JobDetail {
            job,
            status_detail,
            assignees,
        },
    )))
}

pub async fn patch_job(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(job_id): Path<Uuid>,
    ValidJson(body): ValidJson<PatchJobRequest>,
) -> WebResult<Json<BaseResponse<MJob>>> {
    ensure_permission(&user, Permission::EditJobs)?;

    let job = load_job(&state, job_id).await?;
    let mut ajob = job.into_active_model();

    if let Some(display_name) = body.display_name {
        validate_display_name(&display_name)
            .map_err(|e| WebError::invalid_field("display_name", e))?;
        ajob.display_name = Set(display_name);
    }

    if let Some(client_name) = body.client_name {
        validate_display_name(&client_name)
            .map_err(|e| WebError::invalid_field("client_name", e))?;
        ajob.client_name = Set(client_name);
    }

    if let Some(description) = body.description {
        ajob.description = Set(description);
    }

    if let Some(income_cost) = body.income_cost {
        validate_cost(income_cost).map_err(|e| WebError::invalid_field("income_cost", e))?;
        ajob.income_cost = Set(income_cost);
    }

    if let Some(staff_cost) = body.staff_cost {
        validate_cost(staff_cost).map_err(|e| WebError::invalid_field("staff_cost", e))?;
        ajob.staff_cost = Set(staff_cost);
    }

    if let Some(is_priority) = body.is_priority {
        ajob.is_priority = Set(is_priority);
    }

    if let Some(is_paid) = body.is_paid {
        ajob.is_paid = Set(is_paid);
    }

    if let Some(is_published) = body.is_published {
        ajob.is_published = Set(is_published);
    }

    if let Some(channel) = body.payment_channel_id {
        EPaymentChannel::find_by_id(channel)
            .one(&state.db)
            .await?
            .ok_or_else(|| WebError::not_found("Payment channel"))?;
        ajob.payment_channel = Set(Some(channel));
    }

    if let Some(due_at) = body.due_at {
        ajob.due_at = Set(Some(due_at));
    }

    ajob.updated_at = Set(Utc::now().naive_utc());
    let job = ajob.update(&state.db).await?;

    Ok(Json(BaseResponse::new("Job updated", job)))
}

pub async fn delete_job(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(job_id): Path<Uuid>,
) -> WebResult<Json<BaseResponse<bool>>> {
    ensure_permission(&user, Permission::EditJobs)?;

    let job = load_job(&state, job_id).await?;
    let now = Utc::now().naive_utc();

    let mut ajob = job.into_active_model();
    ajob.deleted_at = Set(Some(now));
    ajob.updated_at = Set(now);
    ajob.update(&state.db).await?;

    tracing::info!(job = %job_id, "Job deleted");
    Ok(Json(BaseResponse::new("Job deleted", true)))
}

pub async fn patch_change_status(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(job_id): Path<Uuid>,
    ValidJson(body): ValidJson<ChangeStatusRequest>,
) -> WebResult<Json<BaseResponse<MJobActivityLog>>> {
    ensure_permission(&user, Permission::EditJobs)?;

    let change = StatusChange {
        from: body.from_status_id,
        to: body.to_status_id,
    };

    let log = workflow::change_status(
        &state.db,
        job_id,
        change,
        user.id,
        state.cli.strict_transitions,
    )
    .await
    .map_err(|e| match e {
        WorkflowError::Database(err) => {
            tracing::error!(job = %job_id, "Change status failed: {}", err);
            WebError::InternalServerError("Change status failed".to_string())
        }
        e => e.into(),
    })?;

    Ok(Json(BaseResponse::new("Status changed", log)))
}

pub async fn patch_assign_member(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(job_id): Path<Uuid>,
    ValidJson(body): ValidJson<AssignMemberRequest>,
) -> WebResult<Json<BaseResponse<MJobActivityLog>>> {
    ensure_permission(&user, Permission::EditJobs)?;

    let changed = workflow::update_members(
        &state.db,
        job_id,
        &body.prev_member_ids,
        &body.update_member_ids,
        user.id,
    )
    .await?;

    for member in &changed.added {
        if let Err(e) = notify(
            &state.db,
            &state.realtime,
            *member,
            "Assigned to job".to_string(),
            format!(
                "You were assigned to {} ({})",
                changed.job.number, changed.job.display_name
            ),
        )
        .await
        {
            tracing::warn!(member = %member, "Failed to notify assigned member: {}", e);
        }
    }

    Ok(Json(BaseResponse::new("Members updated", changed.log)))
}

pub async fn delete_member(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path((job_id, member_id)): Path<(Uuid, Uuid)>,
) -> WebResult<Json<BaseResponse<MJobActivityLog>>> {
    ensure_permission(&user, Permission::EditJobs)?;

    let log = workflow::remove_member(&state.db, job_id, member_id, user.id).await?;

    Ok(Json(BaseResponse::new("Member removed", log)))
}

pub async fn get_activity_log(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(job_id): Path<Uuid>,
) -> WebResult<Json<BaseResponse<Vec<MJobActivityLog>>>> {
    ensure_permission(&user, Permission::ViewJobs)?;

    let log = workflow::activity_log(&state.db, job_id).await?;

    Ok(Json(BaseResponse::new("Activity log", log)))
}

pub async fn post_toggle_pin(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(job_id): Path<Uuid>,
) -> WebResult<Json<BaseResponse<PinState>>> {
    load_job(&state, job_id).await?;

    let pin_state = toggle_pin(&state.db, user.id, job_id).await?;

    Ok(Json(BaseResponse::new(
        if pin_state.pinned {
            "Job pinned"
        } else {
            "Job unpinned"
        },
        pin_state,
    )))
}

pub async fn get_pinned(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
) -> WebResult<Json<BaseResponse<Vec<MJob>>>> {
    let jobs = pinned_jobs(&state.db, user.id).await?;

    Ok(Json(BaseResponse::new("Pinned jobs", jobs)))
}

pub async fn get_comments(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(job_id): Path<Uuid>,
) -> WebResult<Json<BaseResponse<Vec<MComment>>>> {
    ensure_permission(&user, Permission::ViewJobs)?;
    load_job(&state, job_id).await?;

    let comments = EComment::find()
        .filter(CComment::Job.eq(job_id))
        .order_by_asc(CComment::CreatedAt)
        .all(&state.db)
        .await?;

    Ok(Json(BaseResponse::new("Comments", comments)))
}

pub async fn post_comment(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(job_id): Path<Uuid>,
    ValidJson(body): ValidJson<MakeCommentRequest>,
) -> WebResult<Json<BaseResponse<MComment>>> {
    ensure_permission(&user, Permission::ViewJobs)?;

    if body.content.trim().is_empty() {
        return Err(WebError::invalid_field(
            "content",
            "Comment cannot be empty".to_string(),
        ));
    }

    load_job(&state, job_id).await?;

    let now = Utc::now().naive_utc();
    let comment = AComment {
        id: Set(Uuid::new_v4()),
        job: Set(job_id),
        user: Set(user.id),
        content: Set(body.content),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.db)
    .await?;

    Ok(Json(BaseResponse::new("Comment added", comment)))
}
