/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::{Context, Result};
use chrono::Utc;
use entity::job_status::SystemType;
use entity::user::UserRole;
use password_auth::generate_hash;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, Set,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use uuid::Uuid;

use crate::input::{check_index_name, load_secret, validate_email};
use crate::types::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateDepartment {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateJobType {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatePaymentChannel {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateJobStatus {
    pub code: String,
    pub title: String,
    pub order: i32,
    #[serde(default = "default_system_type")]
    pub system_type: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateTransition {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateUser {
    pub email: String,
    pub name: String,
    pub password_file: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateConfiguration {
    #[serde(default)]
    pub departments: Vec<StateDepartment>,
    #[serde(default)]
    pub job_types: Vec<StateJobType>,
    #[serde(default)]
    pub payment_channels: Vec<StatePaymentChannel>,
    #[serde(default)]
    pub job_statuses: Vec<StateJobStatus>,
    #[serde(default)]
    pub transitions: Vec<StateTransition>,
    #[serde(default)]
    pub users: Vec<StateUser>,
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("Validation error in field '{field}': {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub is_valid: bool,
}

fn default_system_type() -> String {
    "STANDARD".to_string()
}

fn default_color() -> String {
    "#94a3b8".to_string()
}

fn default_role() -> String {
    "staff".to_string()
}

fn check_codes<'a>(
    section: &str,
    codes: impl Iterator<Item = &'a String>,
    errors: &mut Vec<ValidationError>,
) -> HashSet<&'a String> {
    let mut seen = HashSet::new();

    for code in codes {
        if let Err(message) = check_index_name(code) {
            errors.push(ValidationError {
                field: format!("{}.{}.code", section, code),
                message,
            });
        }

        if !seen.insert(code) {
            errors.push(ValidationError {
                field: format!("{}.{}.code", section, code),
                message: "Duplicate code found".to_string(),
            });
        }
    }

    seen
}

impl StateConfiguration {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read state file {}", path))?;
        serde_json::from_str(&content).context("Failed to parse state file")
    }

    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();

        let department_codes = check_codes(
            "departments",
            self.departments.iter().map(|d| &d.code),
            &mut errors,
        );
        check_codes("job_types", self.job_types.iter().map(|t| &t.code), &mut errors);
        check_codes(
            "payment_channels",
            self.payment_channels.iter().map(|p| &p.code),
            &mut errors,
        );
        check_codes(
            "job_statuses",
            self.job_statuses.iter().map(|s| &s.code),
            &mut errors,
        );

        let mut seen_orders = HashSet::new();
        let mut system_types: HashMap<&String, SystemType> = HashMap::new();

        for status in &self.job_statuses {
            if !seen_orders.insert(status.order) {
                errors.push(ValidationError {
                    field: format!("job_statuses.{}.order", status.code),
                    message: format!("Duplicate order {} found", status.order),
                });
            }

            match status.system_type.parse::<SystemType>() {
                Ok(system_type) => {
                    system_types.insert(&status.code, system_type);
                }
                Err(message) => errors.push(ValidationError {
                    field: format!("job_statuses.{}.system_type", status.code),
                    message,
                }),
            }
        }

        let mut seen_edges = HashSet::new();

        for transition in &self.transitions {
            let field = format!("transitions.{}->{}", transition.from, transition.to);

            for code in [&transition.from, &transition.to] {
                if !self.job_statuses.iter().any(|s| &s.code == code) {
                    errors.push(ValidationError {
                        field: field.clone(),
                        message: format!("Job status '{}' does not exist", code),
                    });
                }
            }

            if system_types
                .get(&transition.from)
                .is_some_and(|t| t.is_terminal())
            {
                errors.push(ValidationError {
                    field: field.clone(),
                    message: format!(
                        "Job status '{}' ends the workflow and cannot have outgoing transitions",
                        transition.from
                    ),
                });
            }

            if !seen_edges.insert((&transition.from, &transition.to)) {
                errors.push(ValidationError {
                    field,
                    message: "Duplicate transition found".to_string(),
                });
            }
        }

        let mut seen_emails = HashSet::new();

        for user in &self.users {
            let email = user.email.to_lowercase();

            if !seen_emails.insert(email.clone()) {
                errors.push(ValidationError {
                    field: format!("users.{}.email", user.email),
                    message: "Duplicate email found".to_string(),
                });
            }

            if let Err(message) = validate_email(&email) {
                errors.push(ValidationError {
                    field: format!("users.{}.email", user.email),
                    message,
                });
            }

            if let Err(message) = user.role.parse::<UserRole>() {
                errors.push(ValidationError {
                    field: format!("users.{}.role", user.email),
                    message,
                });
            }

            if let Some(department) = &user.department {
                if !department_codes.contains(department) {
                    errors.push(ValidationError {
                        field: format!("users.{}.department", user.email),
                        message: format!("Department '{}' does not exist", department),
                    });
                }
            }
        }

        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

pub async fn load_and_apply_state(
    db: &DatabaseConnection,
    state_file_path: Option<&str>,
    delete_state: bool,
) -> Result<()> {
    let Some(path) = state_file_path else {
        tracing::info!("No state file configured, skipping state management");
        return Ok(());
    };

    tracing::info!("Loading state configuration from: {}", path);
    let config = StateConfiguration::from_file(path)?;

    let validation = config.validate();
    if !validation.is_valid {
        let error_messages = validation
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<String>>();

        anyhow::bail!(
            "State configuration validation failed:\n{}",
            error_messages.join("\n")
        );
    }

    tracing::info!("State configuration validated successfully");
    apply_state_to_database(db, &config, delete_state).await
}

async fn apply_state_to_database(
    db: &DatabaseConnection,
    config: &StateConfiguration,
    delete_state: bool,
) -> Result<()> {
    apply_departments(db, &config.departments).await?;
    apply_job_types(db, &config.job_types).await?;
    apply_payment_channels(db, &config.payment_channels).await?;
    apply_job_statuses(db, &config.job_statuses).await?;
    apply_transitions(db, config).await?;
    apply_users(db, &config.users).await?;
    unmark_removed_entities(db, config, delete_state).await?;

    tracing::info!("State applied successfully");
    Ok(())
}

async fn apply_departments(db: &DatabaseConnection, departments: &[StateDepartment]) -> Result<()> {
    for state_department in departments {
        let existing = EDepartment::find()
            .filter(CDepartment::Code.eq(&state_department.code))
            .one(db)
            .await?;

        if let Some(existing) = existing {
            let mut adepartment = existing.into_active_model();
            adepartment.name = Set(state_department.name.clone());
            adepartment.managed = Set(true);
            adepartment.update(db).await?;
        } else {
            ADepartment {
                id: Set(Uuid::new_v4()),
                code: Set(state_department.code.clone()),
                name: Set(state_department.name.clone()),
                managed: Set(true),
                created_at: Set(Utc::now().naive_utc()),
            }
            .insert(db)
            .await?;
            tracing::info!("Created managed department: {}", state_department.code);
        }
    }

    Ok(())
}

async fn apply_job_types(db: &DatabaseConnection, job_types: &[StateJobType]) -> Result<()> {
    for state_job_type in job_types {
        let existing = EJobType::find()
            .filter(CJobType::Code.eq(&state_job_type.code))
            .one(db)
            .await?;

        if let Some(existing) = existing {
            let mut ajob_type = existing.into_active_model();
            ajob_type.name = Set(state_job_type.name.clone());
            ajob_type.color = Set(state_job_type.color.clone());
            ajob_type.managed = Set(true);
            ajob_type.update(db).await?;
        } else {
            AJobType {
                id: Set(Uuid::new_v4()),
                code: Set(state_job_type.code.clone()),
                name: Set(state_job_type.name.clone()),
                color: Set(state_job_type.color.clone()),
                managed: Set(true),
                created_at: Set(Utc::now().naive_utc()),
            }
            .insert(db)
            .await?;
            tracing::info!("Created managed job type: {}", state_job_type.code);
        }
    }

    Ok(())
}

async fn apply_payment_channels(
    db: &DatabaseConnection,
    payment_channels: &[StatePaymentChannel],
) -> Result<()> {
    for state_channel in payment_channels {
        let existing = EPaymentChannel::find()
            .filter(CPaymentChannel::Code.eq(&state_channel.code))
            .one(db)
            .await?;

        if let Some(existing) = existing {
            let mut achannel = existing.into_active_model();
            achannel.name = Set(state_channel.name.clone());
            achannel.managed = Set(true);
            achannel.update(db).await?;
        } else {
            APaymentChannel {
                id: Set(Uuid::new_v4()),
                code: Set(state_channel.code.clone()),
                name: Set(state_channel.name.clone()),
                managed: Set(true),
                created_at: Set(Utc::now().naive_utc()),
            }
            .insert(db)
            .await?;
            tracing::info!("Created managed payment channel: {}", state_channel.code);
        }
    }

    Ok(())
}

async fn apply_job_statuses(db: &DatabaseConnection, statuses: &[StateJobStatus]) -> Result<()> {
    for state_status in statuses {
        let system_type = state_status
            .system_type
            .parse::<SystemType>()
            .map_err(anyhow::Error::msg)?;

        let existing = EJobStatus::find()
            .filter(CJobStatus::Code.eq(&state_status.code))
            .one(db)
            .await?;

        if let Some(existing) = existing {
            let mut astatus = existing.into_active_model();
            astatus.title = Set(state_status.title.clone());
            astatus.order = Set(state_status.order);
            astatus.system_type = Set(system_type);
            astatus.color = Set(state_status.color.clone());
            astatus.icon = Set(state_status.icon.clone());
            astatus.managed = Set(true);
            astatus.update(db).await?;
        } else {
            AJobStatus {
                id: Set(Uuid::new_v4()),
                code: Set(state_status.code.clone()),
                title: Set(state_status.title.clone()),
                order: Set(state_status.order),
                system_type: Set(system_type),
                color: Set(state_status.color.clone()),
                icon: Set(state_status.icon.clone()),
                managed: Set(true),
                created_at: Set(Utc::now().naive_utc()),
            }
            .insert(db)
            .await?;
            tracing::info!("Created managed job status: {}", state_status.code);
        }
    }

    Ok(())
}

/// Managed statuses get exactly the outgoing edges listed in the file.
async fn apply_transitions(db: &DatabaseConnection, config: &StateConfiguration) -> Result<()> {
    if config.job_statuses.is_empty() {
        return Ok(());
    }

    let status_ids = EJobStatus::find()
        .all(db)
        .await?
        .into_iter()
        .map(|s| (s.code, s.id))
        .collect::<HashMap<String, Uuid>>();

    let lookup = |code: &String| {
        status_ids
            .get(code)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Job status '{}' not found", code))
    };

    let mut wanted = HashSet::new();
    for transition in &config.transitions {
        wanted.insert((lookup(&transition.from)?, lookup(&transition.to)?));
    }

    let managed_sources = config
        .job_statuses
        .iter()
        .map(|s| lookup(&s.code))
        .collect::<Result<HashSet<Uuid>>>()?;

    let existing = EJobStatusTransition::find().all(db).await?;
    let mut present = HashSet::new();

    for transition in existing {
        let edge = (transition.from_status, transition.to_status);

        if managed_sources.contains(&edge.0) && !wanted.contains(&edge) {
            EJobStatusTransition::delete_by_id(transition.id)
                .exec(db)
                .await?;
        } else {
            present.insert(edge);
        }
    }

    for (from, to) in wanted.difference(&present) {
        AJobStatusTransition {
            id: Set(Uuid::new_v4()),
            from_status: Set(*from),
            to_status: Set(*to),
        }
        .insert(db)
        .await?;
    }

    Ok(())
}

async fn apply_users(db: &DatabaseConnection, state_users: &[StateUser]) -> Result<()> {
    let departments = EDepartment::find()
        .all(db)
        .await?
        .into_iter()
        .map(|d| (d.code, d.id))
        .collect::<HashMap<String, Uuid>>();

    for state_user in state_users {
        let password = load_secret(&state_user.password_file);
        if password.is_empty() {
            anyhow::bail!(
                "Password file {} for user {} is empty or missing",
                state_user.password_file,
                state_user.email
            );
        }

        let role = state_user
            .role
            .parse::<UserRole>()
            .map_err(anyhow::Error::msg)?;
        let department = state_user
            .department
            .as_ref()
            .and_then(|code| departments.get(code).copied());
        let email = state_user.email.to_lowercase();

        let existing_user = EUser::find()
            .filter(CUser::Email.eq(&email))
            .one(db)
            .await?;

        if let Some(existing) = existing_user {
            let mut auser = existing.into_active_model();
            auser.name = Set(state_user.name.clone());
            auser.password = Set(generate_hash(&password));
            auser.role = Set(role);
            auser.department = Set(department);
            auser.job_title = Set(state_user.job_title.clone());
            auser.managed = Set(true);
            auser.update(db).await?;
            tracing::info!("Updated managed user: {}", email);
        } else {
            let now = Utc::now().naive_utc();

            AUser {
                id: Set(Uuid::new_v4()),
                email: Set(email.clone()),
                name: Set(state_user.name.clone()),
                password: Set(generate_hash(&password)),
                role: Set(role),
                department: Set(department),
                job_title: Set(state_user.job_title.clone()),
                avatar: Set(None),
                last_login_at: Set(now),
                last_active_at: Set(now),
                created_at: Set(now),
                managed: Set(true),
            }
            .insert(db)
            .await?;
            tracing::info!("Created managed user: {}", email);
        }
    }

    Ok(())
}

async fn unmark_removed_entities(
    db: &DatabaseConnection,
    config: &StateConfiguration,
    delete_state: bool,
) -> Result<()> {
    let state_departments: HashSet<&String> = config.departments.iter().map(|d| &d.code).collect();
    let state_job_types: HashSet<&String> = config.job_types.iter().map(|t| &t.code).collect();
    let state_channels: HashSet<&String> =
        config.payment_channels.iter().map(|p| &p.code).collect();
    let state_statuses: HashSet<&String> = config.job_statuses.iter().map(|s| &s.code).collect();
    let state_emails: HashSet<String> = config
        .users
        .iter()
        .map(|u| u.email.to_lowercase())
        .collect();

    let managed_departments = EDepartment::find()
        .filter(CDepartment::Managed.eq(true))
        .all(db)
        .await?;

    for department in managed_departments {
        if !state_departments.contains(&department.code) {
            let code = department.code.clone();
            if delete_state {
                EDepartment::delete_by_id(department.id).exec(db).await?;
                tracing::info!("Deleted department: {}", code);
            } else {
                let mut adepartment = department.into_active_model();
                adepartment.managed = Set(false);
                adepartment.update(db).await?;
                tracing::info!("Unmanaged department: {}", code);
            }
        }
    }

    let managed_job_types = EJobType::find()
        .filter(CJobType::Managed.eq(true))
        .all(db)
        .await?;

    for job_type in managed_job_types {
        if !state_job_types.contains(&job_type.code) {
            let code = job_type.code.clone();
            if delete_state {
                EJobType::delete_by_id(job_type.id).exec(db).await?;
                tracing::info!("Deleted job type: {}", code);
            } else {
                let mut ajob_type = job_type.into_active_model();
                ajob_type.managed = Set(false);
                ajob_type.update(db).await?;
                tracing::info!("Unmanaged job type: {}", code);
            }
        }
    }

    let managed_channels = EPaymentChannel::find()
        .filter(CPaymentChannel::Managed.eq(true))
        .all(db)
        .await?;

    for channel in managed_channels {
        if !state_channels.contains(&channel.code) {
            let code = channel.code.clone();
            if delete_state {
                EPaymentChannel::delete_by_id(channel.id).exec(db).await?;
                tracing::info!("Deleted payment channel: {}", code);
            } else {
                let mut achannel = channel.into_active_model();
                achannel.managed = Set(false);
                achannel.update(db).await?;
                tracing::info!("Unmanaged payment channel: {}", code);
            }
        }
    }

    let managed_statuses = EJobStatus::find()
        .filter(CJobStatus::Managed.eq(true))
        .all(db)
        .await?;

    for status in managed_statuses {
        if !state_statuses.contains(&status.code) {
            let code = status.code.clone();
            if delete_state {
                EJobStatus::delete_by_id(status.id).exec(db).await?;
                tracing::info!("Deleted job status: {}", code);
            } else {
                let mut astatus = status.into_active_model();
                astatus.managed = Set(false);
                astatus.update(db).await?;
                tracing::info!("Unmanaged job status: {}", code);
            }
        }
    }

    let managed_users = EUser::find()
        .filter(CUser::Managed.eq(true))
        .all(db)
        .await?;

    for user in managed_users {
        if !state_emails.contains(&user.email) {
            release_removed_user(db, user, delete_state).await?;
        }
    }

    Ok(())
}

/// Whether jobs, activity or comments point at the user.
async fn user_has_history(db: &DatabaseConnection, user_id: Uuid) -> Result<bool, DbErr> {
    let created_job = EJob::find()
        .filter(CJob::CreatedBy.eq(user_id))
        .one(db)
        .await?;

    if created_job.is_some() {
        return Ok(true);
    }

    let logged = EJobActivityLog::find()
        .filter(CJobActivityLog::ModifiedBy.eq(user_id))
        .one(db)
        .await?;

    if logged.is_some() {
        return Ok(true);
    }

    Ok(EComment::find()
        .filter(CComment::User.eq(user_id))
        .one(db)
        .await?
        .is_some())
}

/// Drops a managed user that left the state file. Users with history are
/// only unmanaged, the activity log must keep its authors.
async fn release_removed_user(
    db: &DatabaseConnection,
    user: MUser,
    delete_state: bool,
) -> Result<()> {
    let email = user.email.clone();

    if delete_state && !user_has_history(db, user.id).await? {
        EUser::delete_by_id(user.id).exec(db).await?;
        tracing::info!("Deleted user: {}", email);
        return Ok(());
    }

    let mut auser = user.into_active_model();
    auser.managed = Set(false);
    auser.update(db).await?;

    if delete_state {
        tracing::warn!("User {} has history, unmanaged instead of deleted", email);
    } else {
        tracing::info!("Unmanaged user: {}", email);
    }

    Ok(())
}
