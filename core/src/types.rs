/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::input::{greater_than_zero, port_in_range};
use super::realtime::Realtime;
use chrono::{DateTime, Utc};
use clap::{ArgAction, Parser};
use entity::*;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Parser, Debug, Clone)]
#[command(name = "Worktable", display_name = "Worktable", bin_name = "worktable-server", author = "Wavelens", version, about, long_about = None)]
pub struct Cli {
    #[arg(long, env = "WORKTABLE_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
    #[arg(long, env = "WORKTABLE_LOG_JSON", default_value = "false")]
    pub log_json: bool,
    #[arg(long, env = "WORKTABLE_DEBUG", default_value = "false")]
    pub debug: bool,
    #[arg(long, env = "WORKTABLE_IP", default_value = "127.0.0.1")]
    pub ip: String,
    #[arg(long, env = "WORKTABLE_PORT", value_parser = port_in_range, default_value_t = 3000)]
    pub port: u16,
    #[arg(long, env = "WORKTABLE_WS_PORT", value_parser = port_in_range, default_value_t = 3001)]
    pub ws_port: u16,
    #[arg(
        long,
        env = "WORKTABLE_SERVE_URL",
        default_value = "http://127.0.0.1:8000"
    )]
    pub serve_url: String,
    #[arg(long, env = "WORKTABLE_DATABASE_URL")]
    pub database_url: Option<String>,
    #[arg(long, env = "WORKTABLE_DATABASE_URL_FILE")]
    pub database_url_file: Option<String>,
    #[arg(long, env = "WORKTABLE_JWT_SECRET_FILE")]
    pub jwt_secret_file: String,
    #[arg(long, env = "WORKTABLE_JWT_EXPIRY_HOURS", value_parser = greater_than_zero::<i64>, default_value = "24")]
    pub jwt_expiry_hours: i64,
    #[arg(long, env = "WORKTABLE_DISABLE_REGISTRATION", default_value = "false")]
    pub disable_registration: bool,
    #[arg(long, env = "WORKTABLE_STRICT_TRANSITIONS", default_value_t = true, action = ArgAction::Set)]
    pub strict_transitions: bool,
    #[arg(long, env = "WORKTABLE_STATE_FILE")]
    pub state_file: Option<String>,
    #[arg(long, env = "WORKTABLE_DELETE_STATE", default_value_t = true, action = ArgAction::Set)]
    pub delete_state: bool,
    #[arg(long, env = "WORKTABLE_REPORT_ERRORS", default_value = "false")]
    pub report_errors: bool,
}

#[derive(Debug)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub cli: Cli,
    pub jwt_secret: String,
    pub realtime: Realtime,
}

/// Success envelope shared by every endpoint.
#[derive(Serialize, Deserialize, Debug)]
pub struct BaseResponse<T> {
    pub success: bool,
    pub message: String,
    pub result: T,
    pub timestamp: DateTime<Utc>,
}

impl<T> BaseResponse<T> {
    pub fn new(message: impl Into<String>, result: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            result,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListItem {
    pub id: Uuid,
    pub name: String,
}

pub type ListResponse = Vec<ListItem>;

pub type EComment = comment::Entity;
pub type EDepartment = department::Entity;
pub type EJob = job::Entity;
pub type EJobActivityLog = job_activity_log::Entity;
pub type EJobAssignee = job_assignee::Entity;
pub type EJobPin = job_pin::Entity;
pub type EJobStatus = job_status::Entity;
pub type EJobStatusTransition = job_status_transition::Entity;
pub type EJobType = job_type::Entity;
pub type ENotification = notification::Entity;
pub type EPaymentChannel = payment_channel::Entity;
pub type EUser = user::Entity;
pub type EUserConfig = user_config::Entity;

pub type MComment = comment::Model;
pub type MDepartment = department::Model;
pub type MJob = job::Model;
pub type MJobActivityLog = job_activity_log::Model;
pub type MJobAssignee = job_assignee::Model;
pub type MJobPin = job_pin::Model;
pub type MJobStatus = job_status::Model;
pub type MJobStatusTransition = job_status_transition::Model;
pub type MJobType = job_type::Model;
pub type MNotification = notification::Model;
pub type MPaymentChannel = payment_channel::Model;
pub type MUser = user::Model;
pub type MUserConfig = user_config::Model;

pub type AComment = comment::ActiveModel;
pub type ADepartment = department::ActiveModel;
pub type AJob = job::ActiveModel;
pub type AJobActivityLog = job_activity_log::ActiveModel;
pub type AJobAssignee = job_assignee::ActiveModel;
pub type AJobPin = job_pin::ActiveModel;
pub type AJobStatus = job_status::ActiveModel;
pub type AJobStatusTransition = job_status_transition::ActiveModel;
pub type AJobType = job_type::ActiveModel;
pub type ANotification = notification::ActiveModel;
pub type APaymentChannel = payment_channel::ActiveModel;
pub type AUser = user::ActiveModel;
pub type AUserConfig = user_config::ActiveModel;

pub type CComment = comment::Column;
pub type CDepartment = department::Column;
pub type CJob = job::Column;
pub type CJobActivityLog = job_activity_log::Column;
pub type CJobAssignee = job_assignee::Column;
pub type CJobPin = job_pin::Column;
pub type CJobStatus = job_status::Column;
pub type CJobStatusTransition = job_status_transition::Column;
pub type CJobType = job_type::Column;
pub type CNotification = notification::Column;
pub type CPaymentChannel = payment_channel::Column;
pub type CUser = user::Column;
pub type CUserConfig = user_config::Column;

pub type RJob = job::Relation;
pub type RJobAssignee = job_assignee::Relation;
pub type RJobStatus = job_status::Relation;
