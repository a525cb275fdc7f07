/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::NaiveDateTime;
use entity::job_status::SystemType;
use entity::{job, job_status};
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use serde::{Deserialize, Serialize};

use super::consts::{COMPLETED_STATUS_TITLE, DEFAULT_PER_PAGE, DELIVERED_STATUS_CODE, MAX_PER_PAGE};
use super::types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobTab {
    Priority,
    Active,
    Completed,
    Delivered,
    Late,
    Cancelled,
}

impl std::str::FromStr for JobTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "priority" => Ok(JobTab::Priority),
            "active" => Ok(JobTab::Active),
            "completed" => Ok(JobTab::Completed),
            "delivered" => Ok(JobTab::Delivered),
            "late" => Ok(JobTab::Late),
            "cancelled" => Ok(JobTab::Cancelled),
            _ => Err(format!("Unknown tab: {}", s)),
        }
    }
}

impl JobTab {
    /// Filter over `job` joined with its `job_status`.
    pub fn condition(&self, now: NaiveDateTime) -> Condition {
        match self {
            JobTab::Priority => Condition::all()
                .add(CJob::IsPriority.eq(true))
                .add(CJobStatus::SystemType.eq(SystemType::Standard)),
            JobTab::Active => Condition::all().add(CJobStatus::SystemType.eq(SystemType::Standard)),
            JobTab::Completed => {
                Condition::all().add(CJobStatus::SystemType.eq(SystemType::Completed))
            }
            JobTab::Delivered => Condition::all().add(CJobStatus::Code.eq(DELIVERED_STATUS_CODE)),
            // matched on the title, not the system type
            JobTab::Late => Condition::all()
                .add(CJob::DueAt.lte(now))
                .add(CJobStatus::Title.ne(COMPLETED_STATUS_TITLE)),
            JobTab::Cancelled => {
                Condition::all().add(CJobStatus::SystemType.eq(SystemType::Terminated))
            }
        }
    }

    /// Same rule as [`JobTab::condition`], evaluated in memory.
    pub fn matches(&self, job: &MJob, status: &MJobStatus, now: NaiveDateTime) -> bool {
        if job.deleted_at.is_some() {
            return false;
        }

        match self {
            JobTab::Priority => job.is_priority && status.system_type == SystemType::Standard,
            JobTab::Active => status.system_type == SystemType::Standard,
            JobTab::Completed => status.system_type == SystemType::Completed,
            JobTab::Delivered => status.code == DELIVERED_STATUS_CODE,
            JobTab::Late => {
                job.due_at.is_some_and(|due| due <= now) && status.title != COMPLETED_STATUS_TITLE
            }
            JobTab::Cancelled => status.system_type == SystemType::Terminated,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobQuery {
    pub tab: Option<String>,
    pub search: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobPage {
    pub items: Vec<JobWithStatus>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobWithStatus {
    #[serde(flatten)]
    pub job: MJob,
    pub status_detail: Option<MJobStatus>,
}

impl JobQuery {
    pub fn tab(&self) -> Result<Option<JobTab>, String> {
        self.tab
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| t.parse::<JobTab>())
            .transpose()
    }

    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE)
    }

    pub fn condition(&self, tab: Option<JobTab>, now: NaiveDateTime) -> Condition {
        let mut condition = Condition::all().add(CJob::DeletedAt.is_null());

        if let Some(tab) = tab {
            condition = condition.add(tab.condition(now));
        }

        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = format!("%{}%", escape_like(&search.to_lowercase()));
            let lower_like = |column: CJob| {
                Expr::expr(Func::lower(Expr::col((job::Entity, column))))
                    .like(LikeExpr::new(pattern.clone()).escape('\\'))
            };

            condition = condition.add(
                Condition::any()
                    .add(lower_like(CJob::Number))
                    .add(lower_like(CJob::DisplayName))
                    .add(lower_like(CJob::ClientName)),
            );
        }

        condition
    }
}

/// Search terms match literally, so wildcards typed by the user are escaped.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());

    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}

pub async fn list_jobs(
    db: &DatabaseConnection,
    query: &JobQuery,
    tab: Option<JobTab>,
    now: NaiveDateTime,
) -> Result<JobPage, DbErr> {
    let per_page = query.per_page();
    let page = query.page();

    let paginator = EJob::find()
        .find_also_related(job_status::Entity)
        .filter(query.condition(tab, now))
        .order_by_desc(CJob::CreatedAt)
        .paginate(db, per_page);

    let total = paginator.num_items().await?;
    let items = paginator
        .fetch_page(page - 1)
        .await?
        .into_iter()
        .map(|(job, status_detail)| JobWithStatus { job, status_detail })
        .collect();

    Ok(JobPage {
        items,
        page,
        per_page,
        total,
    })
}
