/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::{DateTime, NaiveDateTime};
use entity::job_status::SystemType;
use std::ops::RangeInclusive;
use std::sync::LazyLock;
use uuid::{Uuid, uuid};

pub const PORT_RANGE: RangeInclusive<usize> = 1..=65535;

pub static NULL_TIME: LazyLock<NaiveDateTime> = LazyLock::new(|| {
    DateTime::from_timestamp(0, 0)
        .unwrap_or_default()
        .naive_utc()
});

pub const JOB_NUMBER_WIDTH: usize = 4;
pub const MAX_PER_PAGE: u64 = 100;
pub const DEFAULT_PER_PAGE: u64 = 20;

pub const ACTIVITY_FIELD_STATUS: &str = "status";
pub const ACTIVITY_FIELD_MEMBERS: &str = "members";

/// Title the late tab compares against.
pub const COMPLETED_STATUS_TITLE: &str = "Completed";
pub const DELIVERED_STATUS_CODE: &str = "delivered";

pub const EVENT_RECEIVED_MESSAGE: &str = "received_message";
pub const EVENT_SEND_MESSAGE: &str = "send_message";

pub const BASE_STATUS_RECEIVED_ID: Uuid = uuid!("00000000-0000-0000-0001-000000000001");
pub const BASE_STATUS_IN_PROGRESS_ID: Uuid = uuid!("00000000-0000-0000-0001-000000000002");
pub const BASE_STATUS_REVISION_ID: Uuid = uuid!("00000000-0000-0000-0001-000000000003");
pub const BASE_STATUS_DELIVERED_ID: Uuid = uuid!("00000000-0000-0000-0001-000000000004");
pub const BASE_STATUS_COMPLETED_ID: Uuid = uuid!("00000000-0000-0000-0001-000000000005");
pub const BASE_STATUS_CANCELLED_ID: Uuid = uuid!("00000000-0000-0000-0001-000000000006");

pub struct BaseStatus {
    pub id: Uuid,
    pub code: &'static str,
    pub title: &'static str,
    pub order: i32,
    pub system_type: SystemType,
    pub color: &'static str,
}

pub const BASE_STATUSES: [BaseStatus; 6] = [
    BaseStatus {
        id: BASE_STATUS_RECEIVED_ID,
        code: "received",
        title: "Received",
        order: 1,
        system_type: SystemType::Standard,
        color: "#94a3b8",
    },
    BaseStatus {
        id: BASE_STATUS_IN_PROGRESS_ID,
        code: "in-progress",
        title: "In progress",
        order: 2,
        system_type: SystemType::Standard,
        color: "#3b82f6",
    },
    BaseStatus {
        id: BASE_STATUS_REVISION_ID,
        code: "revision",
        title: "Revision",
        order: 3,
        system_type: SystemType::Standard,
        color: "#f59e0b",
    },
    BaseStatus {
        id: BASE_STATUS_DELIVERED_ID,
        code: DELIVERED_STATUS_CODE,
        title: "Delivered",
        order: 4,
        system_type: SystemType::Standard,
        color: "#8b5cf6",
    },
    BaseStatus {
        id: BASE_STATUS_COMPLETED_ID,
        code: "completed",
        title: COMPLETED_STATUS_TITLE,
        order: 5,
        system_type: SystemType::Completed,
        color: "#22c55e",
    },
    BaseStatus {
        id: BASE_STATUS_CANCELLED_ID,
        code: "cancelled",
        title: "Cancelled",
        order: 6,
        system_type: SystemType::Terminated,
        color: "#ef4444",
    },
];

/// Default workflow edges, `(from, to)`.
pub const BASE_TRANSITIONS: [(Uuid, Uuid); 9] = [
    (BASE_STATUS_RECEIVED_ID, BASE_STATUS_IN_PROGRESS_ID),
    (BASE_STATUS_IN_PROGRESS_ID, BASE_STATUS_DELIVERED_ID),
    (BASE_STATUS_REVISION_ID, BASE_STATUS_DELIVERED_ID),
    (BASE_STATUS_DELIVERED_ID, BASE_STATUS_COMPLETED_ID),
    (BASE_STATUS_DELIVERED_ID, BASE_STATUS_REVISION_ID),
    (BASE_STATUS_RECEIVED_ID, BASE_STATUS_CANCELLED_ID),
    (BASE_STATUS_IN_PROGRESS_ID, BASE_STATUS_CANCELLED_ID),
    (BASE_STATUS_REVISION_ID, BASE_STATUS_CANCELLED_ID),
    (BASE_STATUS_DELIVERED_ID, BASE_STATUS_CANCELLED_ID),
];
