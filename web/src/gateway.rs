/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! WebSocket gateway.
//!
//! Clients authenticate during the handshake with the same JWT the REST API
//! uses, passed either as `?token=` or as a Bearer header. After that every
//! frame is a JSON `{event, data}` object.

use crate::authorization::{authenticate, bearer_token};
use crate::error::{WebError, WebResult};
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use worktable_core::consts::{EVENT_RECEIVED_MESSAGE, EVENT_SEND_MESSAGE};
use worktable_core::realtime::{GatewayEvent, Realtime};
use worktable_core::types::*;

#[derive(Deserialize, Debug, Default)]
pub struct GatewayQuery {
    pub token: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SendMessage {
    pub to: Uuid,
    pub content: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReceivedMessage {
    pub from: Uuid,
    pub content: String,
}

pub async fn handle_upgrade(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
    Query(query): Query<GatewayQuery>,
    headers: HeaderMap,
) -> WebResult<Response> {
    let token = match query.token {
        Some(token) => token,
        None => bearer_token(&headers)
            .map_err(|_| WebError::Unauthorized("Gateway token missing".to_string()))?,
    };

    let user = authenticate(&state, &token).await?;

    Ok(ws.on_upgrade(move |socket| handle_socket(state, user, socket)))
}

async fn handle_socket(state: Arc<ServerState>, user: MUser, socket: WebSocket) {
    let (socket_id, mut rx) = state.realtime.attach(user.id).await;
    let (mut sink, mut stream) = socket.split();

    let mut outbound = tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            if sink.send(Message::Text(payload.into())).await.is_err() {
                break;
            }
        }
    });

    let inbound_state = Arc::clone(&state);
    let sender = user.id;
    let mut inbound = tokio::spawn(async move {
        while let Some(Ok(message)) = stream.next().await {
            match message {
                Message::Text(text) => {
                    relay(&inbound_state.realtime, sender, text.as_str()).await;
                }
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut outbound => inbound.abort(),
        _ = &mut inbound => outbound.abort(),
    }

    state.realtime.detach(user.id, socket_id).await;
}

/// Relays a client `send_message` frame to the target user's sockets.
/// Returns how many sockets received it; malformed frames are dropped.
pub async fn relay(realtime: &Realtime, from: Uuid, text: &str) -> usize {
    let event = match serde_json::from_str::<GatewayEvent<SendMessage>>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::debug!(user = %from, "Ignoring malformed gateway frame: {}", e);
            return 0;
        }
    };

    if event.event != EVENT_SEND_MESSAGE {
        tracing::debug!(user = %from, event = %event.event, "Ignoring unknown gateway event");
        return 0;
    }

    realtime
        .emit_to_user(
            event.data.to,
            EVENT_RECEIVED_MESSAGE,
            ReceivedMessage {
                from,
                content: event.data.content,
            },
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_relay_delivers_to_target_sockets() {
        let realtime = Realtime::default();
        let (from, to) = (Uuid::new_v4(), Uuid::new_v4());
        let (_, mut rx) = realtime.attach(to).await;

        let frame = serde_json::json!({
            "event": "send_message",
            "data": { "to": to, "content": "hello" },
        })
        .to_string();

        assert_eq!(relay(&realtime, from, &frame).await, 1);

        let payload = rx.recv().await.unwrap();
        let event: GatewayEvent<ReceivedMessage> = serde_json::from_str(&payload).unwrap();
        assert_eq!(event.event, "received_message");
        assert_eq!(
            event.data,
            ReceivedMessage {
                from,
                content: "hello".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_relay_ignores_malformed_and_unknown_frames() {
        let realtime = Realtime::default();
        let to = Uuid::new_v4();
        let (_, _rx) = realtime.attach(to).await;

        assert_eq!(relay(&realtime, Uuid::new_v4(), "not json").await, 0);

        let frame = serde_json::json!({
            "event": "typing",
            "data": { "to": to, "content": "..." },
        })
        .to_string();
        assert_eq!(relay(&realtime, Uuid::new_v4(), &frame).await, 0);
    }

    #[tokio::test]
    async fn test_relay_to_offline_user_reaches_nobody() {
        let realtime = Realtime::default();
        let frame = serde_json::json!({
            "event": "send_message",
            "data": { "to": Uuid::new_v4(), "content": "anyone?" },
        })
        .to_string();

        assert_eq!(relay(&realtime, Uuid::new_v4(), &frame).await, 0);
    }
}
