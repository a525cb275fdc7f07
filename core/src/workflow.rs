/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Job status workflow and the activity log it writes.
//!
//! Allowed moves between statuses are rows of `job_status_transition`.
//! Every status change and every member change appends one row to
//! `job_activity_log` inside the same database transaction as the change
//! itself, so either both are persisted or neither is.

use chrono::Utc;
use entity::job_status::SystemType;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use super::consts::{ACTIVITY_FIELD_MEMBERS, ACTIVITY_FIELD_STATUS};
use super::database::find_active_job;
use super::input::parse_member_ids;
use super::types::*;

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("Job not found")]
    JobNotFound,
    #[error("Status not found")]
    StatusNotFound,
    #[error("Member not found")]
    MemberNotFound,
    #[error("Job status was changed by someone else")]
    StaleStatus,
    #[error("Transition not allowed")]
    TransitionNotAllowed,
    #[error("Transition not found")]
    TransitionNotFound,
    #[error("Transition already exists")]
    TransitionExists,
    #[error("{0}")]
    Invalid(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

/// In-memory view of the transition table.
#[derive(Debug, Clone, Default)]
pub struct Workflow {
    edges: HashMap<Uuid, HashSet<Uuid>>,
}

impl Workflow {
    pub fn from_edges(edges: impl IntoIterator<Item = (Uuid, Uuid)>) -> Self {
        let mut workflow = Self::default();

        for (from, to) in edges {
            workflow.edges.entry(from).or_default().insert(to);
        }

        workflow
    }

    pub fn from_transitions(transitions: &[MJobStatusTransition]) -> Self {
        Self::from_edges(transitions.iter().map(|t| (t.from_status, t.to_status)))
    }

    pub fn allows(&self, from: Uuid, to: Uuid) -> bool {
        self.edges.get(&from).is_some_and(|to_set| to_set.contains(&to))
    }

    pub fn next(&self, from: Uuid) -> Vec<Uuid> {
        self.edges
            .get(&from)
            .map(|to_set| to_set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Allowed targets of `from`, sorted by their `order`.
    pub fn next_statuses(&self, from: Uuid, statuses: &[MJobStatus]) -> Vec<MJobStatus> {
        let mut next = statuses
            .iter()
            .filter(|s| self.allows(from, s.id))
            .cloned()
            .collect::<Vec<MJobStatus>>();

        next.sort_by_key(|s| s.order);
        next
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub from: Uuid,
    pub to: Uuid,
}

#[derive(Debug, Clone)]
pub struct MembersChanged {
    pub job: MJob,
    pub log: MJobActivityLog,
    pub added: Vec<Uuid>,
}

pub async fn load_workflow<C: ConnectionTrait>(db: &C) -> Result<Workflow, DbErr> {
    let transitions = EJobStatusTransition::find().all(db).await?;
    Ok(Workflow::from_transitions(&transitions))
}

pub async fn next_statuses(
    db: &DatabaseConnection,
    from: Uuid,
) -> Result<Vec<MJobStatus>, WorkflowError> {
    EJobStatus::find_by_id(from)
        .one(db)
        .await?
        .ok_or(WorkflowError::StatusNotFound)?;

    let workflow = load_workflow(db).await?;
    let statuses = EJobStatus::find()
        .order_by_asc(CJobStatus::Order)
        .all(db)
        .await?;

    Ok(workflow.next_statuses(from, &statuses))
}

fn activity_entry(
    job: Uuid,
    field_name: &str,
    previous_value: String,
    current_value: String,
    actor: Uuid,
) -> AJobActivityLog {
    AJobActivityLog {
        id: Set(Uuid::new_v4()),
        job: Set(job),
        field_name: Set(field_name.to_string()),
        previous_value: Set(previous_value),
        current_value: Set(current_value),
        modified_by: Set(actor),
        modified_at: Set(Utc::now().naive_utc()),
    }
}

/// Moves a job to another status and records the move.
///
/// In strict mode the job must still be in `change.from` and the edge must
/// exist in the transition table; the update itself is guarded by the old
/// status so two concurrent changes cannot both succeed. Without strict mode
/// the last write wins.
pub async fn change_status(
    db: &DatabaseConnection,
    job_id: Uuid,
    change: StatusChange,
    actor: Uuid,
    strict: bool,
) -> Result<MJobActivityLog, WorkflowError> {
    let txn = db.begin().await?;

    let job = find_active_job(&txn, job_id)
        .await?
        .ok_or(WorkflowError::JobNotFound)?;

    let target = EJobStatus::find_by_id(change.to)
        .one(&txn)
        .await?
        .ok_or(WorkflowError::StatusNotFound)?;

    if strict {
        if job.status != change.from {
            return Err(WorkflowError::StaleStatus);
        }

        if !load_workflow(&txn).await?.allows(change.from, change.to) {
            return Err(WorkflowError::TransitionNotAllowed);
        }
    }

    let now = Utc::now().naive_utc();
    let mut update = EJob::update_many()
        .col_expr(CJob::Status, Expr::value(change.to))
        .col_expr(CJob::UpdatedAt, Expr::value(now))
        .filter(CJob::Id.eq(job.id));

    if job.started_at.is_none() {
        update = update.col_expr(CJob::StartedAt, Expr::value(Some(now)));
    }

    if target.system_type == SystemType::Completed {
        update = update.col_expr(CJob::CompletedAt, Expr::value(Some(now)));
    }

    if strict {
        update = update.filter(CJob::Status.eq(change.from));
    }

    let result = update.exec(&txn).await?;

    if strict && result.rows_affected == 0 {
        return Err(WorkflowError::StaleStatus);
    }

    let log = activity_entry(
        job.id,
        ACTIVITY_FIELD_STATUS,
        change.from.to_string(),
        change.to.to_string(),
        actor,
    )
    .insert(&txn)
    .await?;

    txn.commit().await?;

    tracing::info!(job = %job.id, from = %change.from, to = %change.to, "Job status changed");
    Ok(log)
}

/// Fails with `MemberNotFound` unless every id in `members` is a user.
/// `members` must not contain duplicates.
pub async fn ensure_members_exist<C: ConnectionTrait>(
    db: &C,
    members: &[Uuid],
) -> Result<(), WorkflowError> {
    if members.is_empty() {
        return Ok(());
    }

    let known = EUser::find()
        .filter(CUser::Id.is_in(members.to_vec()))
        .all(db)
        .await?;

    if known.len() != members.len() {
        return Err(WorkflowError::MemberNotFound);
    }

    Ok(())
}

/// Connects every member of `update_raw` that is not assigned yet and logs
/// both raw id lists. Existing assignments are never removed here.
pub async fn update_members(
    db: &DatabaseConnection,
    job_id: Uuid,
    prev_raw: &str,
    update_raw: &str,
    actor: Uuid,
) -> Result<MembersChanged, WorkflowError> {
    parse_member_ids(prev_raw).map_err(WorkflowError::Invalid)?;
    let requested = parse_member_ids(update_raw).map_err(WorkflowError::Invalid)?;

    let txn = db.begin().await?;

    let job = find_active_job(&txn, job_id)
        .await?
        .ok_or(WorkflowError::JobNotFound)?;

    let assigned = EJobAssignee::find()
        .filter(CJobAssignee::Job.eq(job.id))
        .all(&txn)
        .await?
        .into_iter()
        .map(|a| a.user)
        .collect::<HashSet<Uuid>>();

    let added = requested
        .into_iter()
        .filter(|id| !assigned.contains(id))
        .collect::<Vec<Uuid>>();

    if !added.is_empty() {
        ensure_members_exist(&txn, &added).await?;

        let assignees = added.iter().map(|user| AJobAssignee {
            id: Set(Uuid::new_v4()),
            job: Set(job.id),
            user: Set(*user),
        });

        EJobAssignee::insert_many(assignees)
            .exec_without_returning(&txn)
            .await?;
    }

    let log = activity_entry(
        job.id,
        ACTIVITY_FIELD_MEMBERS,
        prev_raw.to_string(),
        update_raw.to_string(),
        actor,
    )
    .insert(&txn)
    .await?;

    txn.commit().await?;

    Ok(MembersChanged { job, log, added })
}

pub async fn remove_member(
    db: &DatabaseConnection,
    job_id: Uuid,
    member: Uuid,
    actor: Uuid,
) -> Result<MJobActivityLog, WorkflowError> {
    let txn = db.begin().await?;

    let job = find_active_job(&txn, job_id)
        .await?
        .ok_or(WorkflowError::JobNotFound)?;

    let assignee = EJobAssignee::find()
        .filter(
            Condition::all()
                .add(CJobAssignee::Job.eq(job.id))
                .add(CJobAssignee::User.eq(member)),
        )
        .one(&txn)
        .await?
        .ok_or(WorkflowError::MemberNotFound)?;

    EJobAssignee::delete_by_id(assignee.id).exec(&txn).await?;

    let log = activity_entry(
        job.id,
        ACTIVITY_FIELD_MEMBERS,
        member.to_string(),
        String::new(),
        actor,
    )
    .insert(&txn)
    .await?;

    txn.commit().await?;

    Ok(log)
}

/// Activity of a job, newest first.
pub async fn activity_log(
    db: &DatabaseConnection,
    job_id: Uuid,
) -> Result<Vec<MJobActivityLog>, WorkflowError> {
    find_active_job(db, job_id)
        .await?
        .ok_or(WorkflowError::JobNotFound)?;

    Ok(EJobActivityLog::find()
        .filter(CJobActivityLog::Job.eq(job_id))
        .order_by_desc(CJobActivityLog::ModifiedAt)
        .all(db)
        .await?)
}

pub async fn add_transition(
    db: &DatabaseConnection,
    change: StatusChange,
) -> Result<MJobStatusTransition, WorkflowError> {
    if change.from == change.to {
        return Err(WorkflowError::Invalid(
            "A status cannot transition to itself".to_string(),
        ));
    }

    let statuses = EJobStatus::find()
        .filter(CJobStatus::Id.is_in([change.from, change.to]))
        .all(db)
        .await?;

    let from = statuses
        .iter()
        .find(|s| s.id == change.from)
        .ok_or(WorkflowError::StatusNotFound)?;

    if !statuses.iter().any(|s| s.id == change.to) {
        return Err(WorkflowError::StatusNotFound);
    }

    if from.system_type.is_terminal() {
        return Err(WorkflowError::Invalid(format!(
            "Status '{}' ends the workflow and cannot have outgoing transitions",
            from.code
        )));
    }

    if load_workflow(db).await?.allows(change.from, change.to) {
        return Err(WorkflowError::TransitionExists);
    }

    let transition = AJobStatusTransition {
        id: Set(Uuid::new_v4()),
        from_status: Set(change.from),
        to_status: Set(change.to),
    }
    .insert(db)
    .await?;

    Ok(transition)
}

pub async fn remove_transition(
    db: &DatabaseConnection,
    change: StatusChange,
) -> Result<(), WorkflowError> {
    let result = EJobStatusTransition::delete_many()
        .filter(
            Condition::all()
                .add(CJobStatusTransition::FromStatus.eq(change.from))
                .add(CJobStatusTransition::ToStatus.eq(change.to)),
        )
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(WorkflowError::TransitionNotFound);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use chrono::NaiveDateTime;
    use entity::user::UserRole;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn job(status: Uuid) -> MJob {
        let now = Utc::now().naive_utc();

        MJob {
            id: Uuid::new_v4(),
            number: "VID-0001".to_string(),
            display_name: "Launch teaser".to_string(),
            client_name: "Northwind".to_string(),
            description: String::new(),
            income_cost: 1200.0,
            staff_cost: 400.0,
            is_priority: false,
            is_paid: false,
            is_published: false,
            status,
            job_type: Uuid::new_v4(),
            payment_channel: None,
            created_by: Uuid::new_v4(),
            due_at: None,
            started_at: None,
            completed_at: None,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn status(id: Uuid, code: &str, order: i32, system_type: SystemType) -> MJobStatus {
        MJobStatus {
            id,
            code: code.to_string(),
            title: code.to_string(),
            order,
            system_type,
            color: "#000000".to_string(),
            icon: None,
            managed: false,
            created_at: NaiveDateTime::default(),
        }
    }

    fn user(id: Uuid) -> MUser {
        let now = Utc::now().naive_utc();

        MUser {
            id,
            email: format!("{id}@studio.test"),
            name: "Editor".to_string(),
            password: String::new(),
            role: UserRole::Staff,
            department: None,
            job_title: None,
            avatar: None,
            last_login_at: now,
            last_active_at: now,
            created_at: now,
            managed: false,
        }
    }

    fn log_row(job: Uuid, field: &str, previous: &str, current: &str, actor: Uuid) -> MJobActivityLog {
        MJobActivityLog {
            id: Uuid::new_v4(),
            job,
            field_name: field.to_string(),
            previous_value: previous.to_string(),
            current_value: current.to_string(),
            modified_by: actor,
            modified_at: Utc::now().naive_utc(),
        }
    }

    fn base_transitions() -> Vec<MJobStatusTransition> {
        BASE_TRANSITIONS
            .iter()
            .map(|(from, to)| MJobStatusTransition {
                id: Uuid::new_v4(),
                from_status: *from,
                to_status: *to,
            })
            .collect()
    }

    fn exec(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    #[test]
    fn test_default_workflow_edges() {
        let workflow = Workflow::from_edges(BASE_TRANSITIONS);

        assert!(workflow.allows(BASE_STATUS_RECEIVED_ID, BASE_STATUS_IN_PROGRESS_ID));
        assert!(workflow.allows(BASE_STATUS_DELIVERED_ID, BASE_STATUS_REVISION_ID));
        assert!(!workflow.allows(BASE_STATUS_RECEIVED_ID, BASE_STATUS_COMPLETED_ID));
        assert!(workflow.next(BASE_STATUS_COMPLETED_ID).is_empty());
        assert!(workflow.next(BASE_STATUS_CANCELLED_ID).is_empty());
    }

    #[test]
    fn test_next_statuses_sorted_by_order() {
        let workflow = Workflow::from_edges(BASE_TRANSITIONS);
        let statuses = BASE_STATUSES
            .iter()
            .rev()
            .map(|s| status(s.id, s.code, s.order, s.system_type))
            .collect::<Vec<_>>();

        let next = workflow
            .next_statuses(BASE_STATUS_DELIVERED_ID, &statuses)
            .into_iter()
            .map(|s| s.code)
            .collect::<Vec<_>>();

        assert_eq!(next, vec!["revision", "completed", "cancelled"]);
    }

    #[tokio::test]
    async fn test_change_status_updates_job_and_logs_once() {
        let actor = Uuid::new_v4();
        let job = job(BASE_STATUS_RECEIVED_ID);
        let change = StatusChange {
            from: BASE_STATUS_RECEIVED_ID,
            to: BASE_STATUS_IN_PROGRESS_ID,
        };
        let expected = log_row(
            job.id,
            ACTIVITY_FIELD_STATUS,
            &change.from.to_string(),
            &change.to.to_string(),
            actor,
        );

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![job.clone()]])
            .append_query_results([vec![status(
                change.to,
                "in-progress",
                2,
                SystemType::Standard,
            )]])
            .append_query_results([base_transitions()])
            .append_query_results([vec![expected.clone()]])
            .append_exec_results([exec(1)])
            .into_connection();

        let log = change_status(&db, job.id, change, actor, true).await.unwrap();

        assert_eq!(log.field_name, "status");
        assert_eq!(log.previous_value, change.from.to_string());
        assert_eq!(log.current_value, change.to.to_string());

        let transaction_log = format!("{:?}", db.into_transaction_log());
        assert_eq!(transaction_log.matches("INSERT").count(), 1);
        assert_eq!(transaction_log.matches("UPDATE").count(), 1);
    }

    #[tokio::test]
    async fn test_change_status_unknown_job_writes_nothing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<MJob>::new()])
            .into_connection();

        let change = StatusChange {
            from: BASE_STATUS_RECEIVED_ID,
            to: BASE_STATUS_IN_PROGRESS_ID,
        };
        let result = change_status(&db, Uuid::new_v4(), change, Uuid::new_v4(), true).await;

        assert!(matches!(result, Err(WorkflowError::JobNotFound)));

        let transaction_log = format!("{:?}", db.into_transaction_log());
        assert!(!transaction_log.contains("INSERT"));
        assert!(!transaction_log.contains("UPDATE"));
    }

    #[tokio::test]
    async fn test_change_status_rejects_stale_from() {
        let job = job(BASE_STATUS_DELIVERED_ID);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![job.clone()]])
            .append_query_results([vec![status(
                BASE_STATUS_IN_PROGRESS_ID,
                "in-progress",
                2,
                SystemType::Standard,
            )]])
            .into_connection();

        let change = StatusChange {
            from: BASE_STATUS_RECEIVED_ID,
            to: BASE_STATUS_IN_PROGRESS_ID,
        };
        let result = change_status(&db, job.id, change, Uuid::new_v4(), true).await;

        assert!(matches!(result, Err(WorkflowError::StaleStatus)));
    }

    #[tokio::test]
    async fn test_change_status_rejects_missing_edge() {
        let job = job(BASE_STATUS_RECEIVED_ID);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![job.clone()]])
            .append_query_results([vec![status(
                BASE_STATUS_COMPLETED_ID,
                "completed",
                5,
                SystemType::Completed,
            )]])
            .append_query_results([base_transitions()])
            .into_connection();

        let change = StatusChange {
            from: BASE_STATUS_RECEIVED_ID,
            to: BASE_STATUS_COMPLETED_ID,
        };
        let result = change_status(&db, job.id, change, Uuid::new_v4(), true).await;

        assert!(matches!(result, Err(WorkflowError::TransitionNotAllowed)));
    }

    #[tokio::test]
    async fn test_change_status_last_write_wins_when_not_strict() {
        let actor = Uuid::new_v4();
        let job = job(BASE_STATUS_DELIVERED_ID);
        let change = StatusChange {
            from: BASE_STATUS_RECEIVED_ID,
            to: BASE_STATUS_COMPLETED_ID,
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![job.clone()]])
            .append_query_results([vec![status(
                change.to,
                "completed",
                5,
                SystemType::Completed,
            )]])
            .append_query_results([vec![log_row(
                job.id,
                ACTIVITY_FIELD_STATUS,
                &change.from.to_string(),
                &change.to.to_string(),
                actor,
            )]])
            .append_exec_results([exec(1)])
            .into_connection();

        let log = change_status(&db, job.id, change, actor, false).await.unwrap();
        assert_eq!(log.current_value, change.to.to_string());
    }

    #[tokio::test]
    async fn test_update_members_connects_only_new_members() {
        let actor = Uuid::new_v4();
        let job = job(BASE_STATUS_RECEIVED_ID);
        let (kept, added) = (Uuid::new_v4(), Uuid::new_v4());
        let prev_raw = format!("[\"{kept}\"]");
        let update_raw = format!("[\"{kept}\", \"{added}\", \"{added}\"]");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![job.clone()]])
            .append_query_results([vec![MJobAssignee {
                id: Uuid::new_v4(),
                job: job.id,
                user: kept,
            }]])
            .append_query_results([vec![user(added)]])
            .append_query_results([vec![log_row(
                job.id,
                ACTIVITY_FIELD_MEMBERS,
                &prev_raw,
                &update_raw,
                actor,
            )]])
            .append_exec_results([exec(1)])
            .into_connection();

        let changed = update_members(&db, job.id, &prev_raw, &update_raw, actor)
            .await
            .unwrap();

        assert_eq!(changed.added, vec![added]);
        assert_eq!(changed.log.field_name, "members");
        assert_eq!(changed.log.previous_value, prev_raw);
        assert_eq!(changed.log.current_value, update_raw);
    }

    #[tokio::test]
    async fn test_update_members_unknown_user_writes_nothing() {
        let job = job(BASE_STATUS_RECEIVED_ID);
        let (known, unknown) = (Uuid::new_v4(), Uuid::new_v4());
        let update_raw = format!("[\"{known}\", \"{unknown}\"]");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![job.clone()]])
            .append_query_results([Vec::<MJobAssignee>::new()])
            .append_query_results([vec![user(known)]])
            .into_connection();

        let result = update_members(&db, job.id, "[]", &update_raw, Uuid::new_v4()).await;

        assert!(matches!(result, Err(WorkflowError::MemberNotFound)));

        let transaction_log = format!("{:?}", db.into_transaction_log());
        assert!(!transaction_log.contains("INSERT"), "{transaction_log}");
    }

    #[tokio::test]
    async fn test_ensure_members_exist_skips_empty_list() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        ensure_members_exist(&db, &[]).await.unwrap();

        assert_eq!(format!("{:?}", db.into_transaction_log()), "[]");
    }

    #[tokio::test]
    async fn test_update_members_rejects_malformed_ids() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let result = update_members(&db, Uuid::new_v4(), "[]", "not json", Uuid::new_v4()).await;

        assert!(matches!(result, Err(WorkflowError::Invalid(_))));
    }

    #[tokio::test]
    async fn test_remove_member_logs_empty_current_value() {
        let actor = Uuid::new_v4();
        let member = Uuid::new_v4();
        let job = job(BASE_STATUS_RECEIVED_ID);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![job.clone()]])
            .append_query_results([vec![MJobAssignee {
                id: Uuid::new_v4(),
                job: job.id,
                user: member,
            }]])
            .append_query_results([vec![log_row(
                job.id,
                ACTIVITY_FIELD_MEMBERS,
                &member.to_string(),
                "",
                actor,
            )]])
            .append_exec_results([exec(1)])
            .into_connection();

        let log = remove_member(&db, job.id, member, actor).await.unwrap();

        assert_eq!(log.previous_value, member.to_string());
        assert_eq!(log.current_value, "");
    }

    #[tokio::test]
    async fn test_add_transition_rejects_terminal_source() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                status(BASE_STATUS_COMPLETED_ID, "completed", 5, SystemType::Completed),
                status(BASE_STATUS_REVISION_ID, "revision", 3, SystemType::Standard),
            ]])
            .into_connection();

        let result = add_transition(
            &db,
            StatusChange {
                from: BASE_STATUS_COMPLETED_ID,
                to: BASE_STATUS_REVISION_ID,
            },
        )
        .await;

        assert!(matches!(result, Err(WorkflowError::Invalid(_))));
    }

    #[tokio::test]
    async fn test_remove_transition_unknown_edge() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec(0)])
            .into_connection();

        let result = remove_transition(
            &db,
            StatusChange {
                from: BASE_STATUS_RECEIVED_ID,
                to: BASE_STATUS_COMPLETED_ID,
            },
        )
        .await;

        assert!(matches!(result, Err(WorkflowError::TransitionNotFound)));
    }
}
