/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use worktable_core::types::Cli;
use worktable_core::{init_logging, init_state};

#[tokio::main]
pub async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    // DSN is read from SENTRY_DSN; without it the client stays disabled.
    let _guard = if cli.report_errors {
        Some(sentry::init(sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        }))
    } else {
        None
    };

    let state = init_state(cli).await?;

    let gateway = tokio::spawn(web::serve_gateway(Arc::clone(&state)));
    let api = web::serve_web(Arc::clone(&state));

    tokio::select! {
        res = api => res?,
        res = gateway => res??,
    }

    Ok(())
}
