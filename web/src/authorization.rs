/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::{WebError, WebResult};
use anyhow::{Context, Result};
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use worktable_core::permission::{Permission, has_permission, is_admin};
use worktable_core::types::*;

#[derive(Clone, Serialize, Deserialize)]
pub struct Claims {
    pub exp: usize,
    pub iat: usize,
    pub id: Uuid,
}

/// Extracts the token of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> WebResult<String> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| WebError::Forbidden("Authorization header not found".to_string()))?
        .to_str()
        .map_err(|_| WebError::Forbidden("Authorization header empty".to_string()))?;

    let mut header = auth_header.split_whitespace();

    match (header.next(), header.next()) {
        (Some("Bearer"), Some(token)) => Ok(token.to_string()),
        _ => Err(WebError::Forbidden(
            "Invalid Authorization header".to_string(),
        )),
    }
}

/// Resolves a token to its user. Bad tokens and unknown users are 401.
pub async fn authenticate(state: &ServerState, token: &str) -> WebResult<MUser> {
    let token_data = decode_jwt(state, token)
        .map_err(|_| WebError::Unauthorized("Unable to decode token".to_string()))?;

    EUser::find_by_id(token_data.claims.id)
        .one(&state.db)
        .await?
        .ok_or_else(|| WebError::Unauthorized("User not found".to_string()))
}

pub async fn authorize(
    state: State<Arc<ServerState>>,
    mut req: Request,
    next: Next,
) -> WebResult<Response<Body>> {
    let token = bearer_token(req.headers())?;
    let current_user = authenticate(&state, &token).await?;

    req.extensions_mut().insert(current_user);
    Ok(next.run(req).await)
}

/// Runs after [`authorize`] on admin-only routes.
pub async fn require_admin(req: Request, next: Next) -> WebResult<Response<Body>> {
    let user = req
        .extensions()
        .get::<MUser>()
        .ok_or_else(|| WebError::Unauthorized("User not found".to_string()))?;

    if !is_admin(user) {
        return Err(WebError::Forbidden("Admin role required".to_string()));
    }

    Ok(next.run(req).await)
}

pub fn ensure_permission(user: &MUser, permission: Permission) -> WebResult<()> {
    if has_permission(user, permission) {
        Ok(())
    } else {
        Err(WebError::missing_permission())
    }
}

pub fn encode_jwt(state: &ServerState, id: Uuid) -> Result<String> {
    let now = Utc::now();
    let exp = (now + Duration::hours(state.cli.jwt_expiry_hours)).timestamp() as usize;
    let iat = now.timestamp() as usize;

    let claims = Claims { iat, exp, id };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.jwt_secret.as_bytes()),
    )
    .context("Failed to encode token")
}

pub fn decode_jwt(state: &ServerState, jwt: &str) -> Result<TokenData<Claims>> {
    decode(
        jwt,
        &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode token")
}

pub async fn update_last_login(state: &ServerState, user: MUser) -> Result<MUser> {
    let now = Utc::now().naive_utc();
    let mut auser: AUser = user.into();

    auser.last_login_at = Set(now);
    auser.last_active_at = Set(now);
    auser
        .update(&state.db)
        .await
        .context("Failed to update user last login")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use clap::Parser;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use worktable_core::realtime::Realtime;

    fn state() -> ServerState {
        ServerState {
            db: MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
            cli: Cli::parse_from(["worktable-server", "--jwt-secret-file", "unused"]),
            jwt_secret: "unit-test-secret".to_string(),
            realtime: Realtime::default(),
        }
    }

    #[test]
    fn test_jwt_round_trip() {
        let state = state();
        let id = Uuid::new_v4();

        let token = encode_jwt(&state, id).unwrap();
        let data = decode_jwt(&state, &token).unwrap();

        assert_eq!(data.claims.id, id);
        assert!(data.claims.exp > data.claims.iat);
    }

    #[test]
    fn test_decode_with_other_secret_fails() {
        let state = state();
        let token = encode_jwt(&state, Uuid::new_v4()).unwrap();

        let other = ServerState {
            jwt_secret: "another-secret".to_string(),
            ..state
        };

        assert!(decode_jwt(&other, &token).is_err());
    }

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert!(bearer_token(&headers).is_err());

        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Basic abc"),
        );
        assert!(bearer_token(&headers).is_err());

        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def"),
        );
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def");
    }
}
