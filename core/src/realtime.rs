/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Presence tracking and fire-and-forget event delivery for the gateway.
//!
//! Which sockets belong to which user is answered by a [`PresenceRegistry`].
//! The bundled [`InMemoryPresence`] keeps that map in process memory, so a
//! restart drops it; deployments with several instances can plug in a shared
//! registry instead. The sending halves of open sockets always live in the
//! local [`SocketHub`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PresenceRegistry: Send + Sync {
    async fn connect(&self, user: Uuid, socket: Uuid);
    async fn disconnect(&self, user: Uuid, socket: Uuid);
    async fn sockets(&self, user: Uuid) -> Vec<Uuid>;
    async fn online_users(&self) -> Vec<Uuid>;
}

#[derive(Default)]
pub struct InMemoryPresence {
    sockets: RwLock<HashMap<Uuid, Vec<Uuid>>>,
}

#[async_trait]
impl PresenceRegistry for InMemoryPresence {
    async fn connect(&self, user: Uuid, socket: Uuid) {
        let mut sockets = self.sockets.write().await;
        let entry = sockets.entry(user).or_default();

        if !entry.contains(&socket) {
            entry.push(socket);
        }
    }

    async fn disconnect(&self, user: Uuid, socket: Uuid) {
        let mut sockets = self.sockets.write().await;

        if let Some(entry) = sockets.get_mut(&user) {
            entry.retain(|s| *s != socket);

            if entry.is_empty() {
                sockets.remove(&user);
            }
        }
    }

    async fn sockets(&self, user: Uuid) -> Vec<Uuid> {
        self.sockets
            .read()
            .await
            .get(&user)
            .cloned()
            .unwrap_or_default()
    }

    async fn online_users(&self) -> Vec<Uuid> {
        self.sockets.read().await.keys().copied().collect()
    }
}

#[derive(Default)]
pub struct SocketHub {
    senders: RwLock<HashMap<Uuid, UnboundedSender<String>>>,
}

impl SocketHub {
    pub async fn register(&self, socket: Uuid) -> UnboundedReceiver<String> {
        let (tx, rx) = unbounded_channel();
        self.senders.write().await.insert(socket, tx);
        rx
    }

    pub async fn unregister(&self, socket: Uuid) {
        self.senders.write().await.remove(&socket);
    }

    /// Returns false when the socket is unknown here or already closed.
    pub async fn send(&self, socket: Uuid, payload: String) -> bool {
        match self.senders.read().await.get(&socket) {
            Some(tx) => tx.send(payload).is_ok(),
            None => false,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GatewayEvent<T> {
    pub event: String,
    pub data: T,
}

pub struct Realtime {
    pub presence: Arc<dyn PresenceRegistry>,
    pub hub: SocketHub,
}

impl fmt::Debug for Realtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Realtime").finish_non_exhaustive()
    }
}

impl Default for Realtime {
    fn default() -> Self {
        Self::new(Arc::new(InMemoryPresence::default()))
    }
}

impl Realtime {
    pub fn new(presence: Arc<dyn PresenceRegistry>) -> Self {
        Self {
            presence,
            hub: SocketHub::default(),
        }
    }

    pub async fn attach(&self, user: Uuid) -> (Uuid, UnboundedReceiver<String>) {
        let socket = Uuid::new_v4();
        let rx = self.hub.register(socket).await;
        self.presence.connect(user, socket).await;
        tracing::debug!(%user, %socket, "socket attached");
        (socket, rx)
    }

    pub async fn detach(&self, user: Uuid, socket: Uuid) {
        self.presence.disconnect(user, socket).await;
        self.hub.unregister(socket).await;
        tracing::debug!(%user, %socket, "socket detached");
    }

    pub async fn emit_to_socket<T: Serialize>(&self, socket: Uuid, event: &str, data: T) -> bool {
        let payload = match serde_json::to_string(&GatewayEvent {
            event: event.to_string(),
            data,
        }) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!("Failed to serialize gateway event {}: {}", event, e);
                return false;
            }
        };

        self.hub.send(socket, payload).await
    }

    /// Sends to every socket of the user and returns how many accepted it.
    pub async fn emit_to_user<T: Serialize + Clone>(&self, user: Uuid, event: &str, data: T) -> usize {
        let mut delivered = 0;

        for socket in self.presence.sockets(user).await {
            if self.emit_to_socket(socket, event, data.clone()).await {
                delivered += 1;
            }
        }

        delivered
    }
}
