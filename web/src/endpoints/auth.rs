/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::authorization::{encode_jwt, update_last_login};
use crate::error::{ValidJson, WebError, WebResult};
use axum::extract::State;
use axum::{Extension, Json};
use chrono::Utc;
use entity::user::UserRole;
use password_auth::{generate_hash, verify_password};
use sea_orm::ActiveModelTrait;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use worktable_core::consts::NULL_TIME;
use worktable_core::database::find_user_by_email;
use worktable_core::input::{validate_display_name, validate_email, validate_password};
use worktable_core::types::*;

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeUserRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeLoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    pub access_token: String,
}

fn token_response(state: &ServerState, user: &MUser) -> WebResult<TokenResponse> {
    let access_token = encode_jwt(state, user.id).map_err(|e| {
        tracing::error!("Failed to encode token: {:#}", e);
        WebError::failed_to_generate_token()
    })?;

    Ok(TokenResponse { access_token })
}

pub async fn post_register(
    state: State<Arc<ServerState>>,
    ValidJson(body): ValidJson<MakeUserRequest>,
) -> WebResult<Json<BaseResponse<TokenResponse>>> {
    if state.cli.disable_registration {
        return Err(WebError::registration_disabled());
    }

    let email = body.email.trim().to_lowercase();

    validate_email(&email).map_err(|e| WebError::invalid_field("email", e))?;
    validate_display_name(&body.name).map_err(|e| WebError::invalid_field("name", e))?;
    validate_password(&body.password).map_err(|e| WebError::invalid_field("password", e))?;

    if find_user_by_email(&state.db, &email).await?.is_some() {
        return Err(WebError::already_exists("User"));
    }

    let now = Utc::now().naive_utc();
    let user = AUser {
        id: Set(Uuid::new_v4()),
        email: Set(email),
        name: Set(body.name.clone()),
        password: Set(generate_hash(&body.password)),
        role: Set(UserRole::Staff),
        department: Set(None),
        job_title: Set(None),
        avatar: Set(None),
        last_login_at: Set(*NULL_TIME),
        last_active_at: Set(now),
        created_at: Set(now),
        managed: Set(false),
    }
    .insert(&state.db)
    .await?;

    tracing::info!(user = %user.id, "User registered");

    Ok(Json(BaseResponse::new(
        "Registered",
        token_response(&state, &user)?,
    )))
}

pub async fn post_login(
    state: State<Arc<ServerState>>,
    ValidJson(body): ValidJson<MakeLoginRequest>,
) -> WebResult<Json<BaseResponse<TokenResponse>>> {
    let user = find_user_by_email(&state.db, body.email.trim())
        .await?
        .ok_or_else(WebError::invalid_credentials)?;

    if verify_password(&body.password, &user.password).is_err() {
        return Err(WebError::invalid_credentials());
    }

    let user = update_last_login(&state, user).await?;

    Ok(Json(BaseResponse::new(
        "Logged in",
        token_response(&state, &user)?,
    )))
}

/// Tokens are stateless; the client drops its copy.
pub async fn post_logout(
    Extension(user): Extension<MUser>,
) -> WebResult<Json<BaseResponse<bool>>> {
    tracing::debug!(user = %user.id, "User logged out");
    Ok(Json(BaseResponse::new("Logged out", true)))
}

pub async fn get_me(
    Extension(user): Extension<MUser>,
) -> WebResult<Json<BaseResponse<MUser>>> {
    Ok(Json(BaseResponse::new("Current user", user)))
}
