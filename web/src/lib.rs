/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod authorization;
pub mod endpoints;
pub mod error;
pub mod gateway;

use anyhow::{Context, Result};
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::{delete, get, patch, post, put};
use axum::{Router, middleware};
use endpoints::*;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use worktable_core::types::{Cli, ServerState};

pub fn cors_layer(cli: &Cli) -> Result<CorsLayer> {
    let serve_url = cli
        .serve_url
        .parse::<HeaderValue>()
        .context("Invalid serve url")?;

    let allow_origin = if cli.debug {
        let local = format!("http://{}:8000", cli.ip)
            .parse::<HeaderValue>()
            .context("Invalid debug origin")?;

        AllowOrigin::list(vec![serve_url, local])
    } else {
        AllowOrigin::exact(serve_url)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE])
        .allow_credentials(true))
}

pub fn create_router(state: Arc<ServerState>) -> Result<Router> {
    let admin = Router::new()
        .route("/departments", post(reference::post_department))
        .route("/departments/{id}", patch(reference::patch_department))
        .route("/job-types", post(reference::post_job_type))
        .route("/job-types/{id}", patch(reference::patch_job_type))
        .route("/payment-channels", post(reference::post_payment_channel))
        .route(
            "/payment-channels/{id}",
            patch(reference::patch_payment_channel),
        )
        .route("/job-statuses", post(statuses::post))
        .route("/job-statuses/{id}", patch(statuses::patch_status))
        .route(
            "/job-statuses/transitions",
            put(statuses::put_transition).delete(statuses::delete_transition),
        )
        .route("/users/{id}/role", patch(users::patch_role))
        .route_layer(middleware::from_fn(authorization::require_admin));

    let api = Router::new()
        .route("/auth/logout", post(auth::post_logout))
        .route("/auth/me", get(auth::get_me))
        .route("/jobs", get(jobs::get).post(jobs::post))
        .route("/jobs/pinned", get(jobs::get_pinned))
        .route(
            "/jobs/{id}",
            get(jobs::get_job)
                .patch(jobs::patch_job)
                .delete(jobs::delete_job),
        )
        .route("/jobs/{id}/change-status", patch(jobs::patch_change_status))
        .route("/jobs/{id}/assign-member", patch(jobs::patch_assign_member))
        .route("/jobs/{id}/members/{member_id}", delete(jobs::delete_member))
        .route("/jobs/{id}/activity-log", get(jobs::get_activity_log))
        .route("/jobs/{id}/toggle-pin", post(jobs::post_toggle_pin))
        .route(
            "/jobs/{id}/comments",
            get(jobs::get_comments).post(jobs::post_comment),
        )
        .route("/job-statuses", get(statuses::get))
        .route("/job-statuses/transitions", get(statuses::get_transitions))
        .route("/job-statuses/{id}/next", get(statuses::get_next))
        .route("/departments", get(reference::get_departments))
        .route("/job-types", get(reference::get_job_types))
        .route("/payment-channels", get(reference::get_payment_channels))
        .route("/users", get(users::get))
        .route("/users/online", get(users::get_online))
        .route(
            "/users/me/config/{code}",
            get(users::get_config).put(users::put_config),
        )
        .route("/notifications", get(notifications::get))
        .route("/notifications/{id}/read", patch(notifications::patch_read))
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            authorization::authorize,
        ))
        .route("/auth/register", post(auth::post_register))
        .route("/auth/login", post(auth::post_login))
        .route("/health", get(get_health));

    let cors = cors_layer(&state.cli)?;

    Ok(Router::new()
        .nest("/api/v1", api)
        .fallback(handle_404)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

pub fn create_gateway_router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/", get(gateway::handle_upgrade))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve_web(state: Arc<ServerState>) -> Result<()> {
    let server_url = format!("{}:{}", state.cli.ip, state.cli.port);
    let app = create_router(Arc::clone(&state))?;

    let listener = tokio::net::TcpListener::bind(&server_url)
        .await
        .with_context(|| format!("Failed to bind {}", server_url))?;

    tracing::info!("Serving API on {}", server_url);
    axum::serve(listener, app).await.context("API server failed")
}

pub async fn serve_gateway(state: Arc<ServerState>) -> Result<()> {
    let gateway_url = format!("{}:{}", state.cli.ip, state.cli.ws_port);
    let app = create_gateway_router(state);

    let listener = tokio::net::TcpListener::bind(&gateway_url)
        .await
        .with_context(|| format!("Failed to bind {}", gateway_url))?;

    tracing::info!("Serving gateway on {}", gateway_url);
    axum::serve(listener, app).await.context("Gateway server failed")
}
