/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use email_address::EmailAddress;
use std::collections::HashSet;
use uuid::Uuid;

use super::consts::*;

/// First failing field of a request body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct InputError {
    pub field: String,
    pub message: String,
}

impl InputError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

pub fn port_in_range(s: &str) -> Result<u16, String> {
    let port: usize = s
        .parse()
        .map_err(|_| format!("`{s}` is not a port number"))?;

    if PORT_RANGE.contains(&port) {
        Ok(port as u16)
    } else {
        Err(format!(
            "port not in range {}-{}",
            PORT_RANGE.start(),
            PORT_RANGE.end()
        ))
    }
}

pub fn greater_than_zero<
    T: std::str::FromStr + std::cmp::PartialOrd + std::fmt::Display + Default,
>(
    s: &str,
) -> Result<T, String> {
    let num: T = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid number", s))?;

    if num > T::default() {
        Ok(num)
    } else {
        Err(format!("`{}` is not larger than 0", s))
    }
}

/// Codes of reference rows and user config keys.
pub fn check_index_name(s: &str) -> Result<(), String> {
    if s.is_empty() {
        return Err("Name cannot be empty".to_string());
    }

    if s != s.to_lowercase() {
        return Err("Name must be lowercase".to_string());
    }

    if s.contains(|c: char| !c.is_ascii_alphanumeric() && c != '-') {
        return Err("Name can only contain letters, numbers, and dashes".to_string());
    }

    if s.starts_with('-') || s.ends_with('-') {
        return Err("Name can only start and end with letters or numbers".to_string());
    }

    Ok(())
}

pub fn load_secret(f: &str) -> String {
    let s = std::fs::read_to_string(f).unwrap_or_default();
    s.trim().replace(char::from(25), "")
}

pub fn validate_email(email: &str) -> Result<(), String> {
    if !EmailAddress::is_valid(email) {
        return Err("Email must be a valid email address".to_string());
    }

    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters long".to_string());
    }

    if password.len() > 128 {
        return Err("Password cannot exceed 128 characters".to_string());
    }

    let has_letter = password.chars().any(|c| c.is_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if !has_letter || !has_digit {
        return Err("Password must contain letters and digits".to_string());
    }

    Ok(())
}

pub fn validate_display_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err("Name cannot be empty".to_string());
    }

    if trimmed.len() > 255 {
        return Err("Name cannot exceed 255 characters".to_string());
    }

    if trimmed != name {
        return Err("Name cannot have leading or trailing whitespace".to_string());
    }

    Ok(())
}

pub fn validate_cost(cost: f64) -> Result<(), String> {
    if !cost.is_finite() || cost < 0.0 {
        return Err("Cost must be a non-negative number".to_string());
    }

    Ok(())
}

/// Parses a JSON encoded array of member ids as sent by the assign-member form.
/// Duplicates collapse, first occurrence wins the position.
pub fn parse_member_ids(raw: &str) -> Result<Vec<Uuid>, String> {
    let ids: Vec<Uuid> = serde_json::from_str(raw)
        .map_err(|e| format!("Member ids must be a JSON array of ids: {}", e))?;

    let mut seen = HashSet::new();
    Ok(ids.into_iter().filter(|id| seen.insert(*id)).collect())
}

pub fn format_job_number(type_code: &str, sequence: u64) -> String {
    format!(
        "{}-{:0width$}",
        type_code.to_uppercase(),
        sequence,
        width = JOB_NUMBER_WIDTH
    )
}
