/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod comment;
pub mod department;
pub mod job;
pub mod job_activity_log;
pub mod job_assignee;
pub mod job_pin;
pub mod job_status;
pub mod job_status_transition;
pub mod job_type;
pub mod notification;
pub mod payment_channel;
pub mod user;
pub mod user_config;
