/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod consts;
pub mod database;
pub mod input;
pub mod notification;
pub mod permission;
pub mod pins;
pub mod realtime;
pub mod state;
pub mod tabs;
pub mod types;
pub mod user_config;
pub mod workflow;

use anyhow::{Context, Result};
use database::connect_db;
use input::load_secret;
use realtime::Realtime;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use types::*;

pub fn init_logging(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_new(&cli.log_level)
        .with_context(|| format!("Invalid log level: {}", cli.log_level))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if cli.log_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

pub async fn init_state(cli: Cli) -> Result<Arc<ServerState>> {
    tracing::info!(
        "Starting Worktable on {}:{} (gateway on port {})",
        cli.ip,
        cli.port,
        cli.ws_port
    );

    let jwt_secret = load_secret(&cli.jwt_secret_file);
    if jwt_secret.is_empty() {
        anyhow::bail!("JWT secret file {} is empty or missing", cli.jwt_secret_file);
    }

    let db = connect_db(&cli).await?;

    Ok(Arc::new(ServerState {
        db,
        cli,
        jwt_secret,
        realtime: Realtime::default(),
    }))
}
