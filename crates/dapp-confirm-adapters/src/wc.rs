use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use dapp_confirm_core::{
    NotificationOutcome, NotifyError, PeerNotifier, RequestId, SessionChannel, SessionId,
    SessionResolver,
};

use crate::{AdapterConfig, AdapterError};

/// Response relayed back to a dapp for one transaction request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayMessage {
    pub topic: String,
    pub request_id: RequestId,
    pub approved: bool,
    pub result: Option<String>,
}

impl RelayMessage {
    pub fn from_outcome(topic: &str, outcome: &NotificationOutcome) -> Self {
        Self {
            topic: topic.to_owned(),
            request_id: outcome.request_id.clone(),
            approved: outcome.accepted,
            result: outcome.result_hash.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Connected,
    Disconnected,
}

#[derive(Debug)]
struct SessionEntry {
    topic: String,
    status: SessionStatus,
    relay: mpsc::Sender<RelayMessage>,
}

/// Connected dapp sessions and their relay channels.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    inner: Arc<Mutex<HashMap<SessionId, SessionEntry>>>,
}

impl SessionRegistry {
    /// Registers a session; the returned receiver is the dapp's side of the relay.
    pub fn connect(
        &self,
        session_id: SessionId,
        topic: impl Into<String>,
        buffer: usize,
    ) -> Result<mpsc::Receiver<RelayMessage>, AdapterError> {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        let mut g = self
            .inner
            .lock()
            .map_err(|_| AdapterError::LockPoisoned("session registry"))?;
        g.insert(
            session_id,
            SessionEntry {
                topic: topic.into(),
                status: SessionStatus::Connected,
                relay: tx,
            },
        );
        Ok(rx)
    }

    pub fn disconnect(&self, session_id: &SessionId) -> Result<(), AdapterError> {
        let mut g = self
            .inner
            .lock()
            .map_err(|_| AdapterError::LockPoisoned("session registry"))?;
        if let Some(entry) = g.get_mut(session_id) {
            entry.status = SessionStatus::Disconnected;
        }
        Ok(())
    }

    pub fn status(&self, session_id: &SessionId) -> Option<SessionStatus> {
        let g = self.inner.lock().ok()?;
        g.get(session_id).map(|entry| entry.status)
    }

    fn relay_for(&self, session_id: &SessionId) -> Result<mpsc::Sender<RelayMessage>, NotifyError> {
        let g = self
            .inner
            .lock()
            .map_err(|e| NotifyError::Transport(format!("session registry lock poisoned: {e}")))?;
        match g.get(session_id) {
            Some(entry) if entry.status == SessionStatus::Connected => Ok(entry.relay.clone()),
            Some(_) => Err(NotifyError::SessionUnavailable(format!(
                "session disconnected: {session_id}"
            ))),
            None => Err(NotifyError::SessionUnavailable(format!(
                "unknown session: {session_id}"
            ))),
        }
    }
}

impl SessionResolver for SessionRegistry {
    fn resolve(&self, session_id: &SessionId) -> Result<SessionChannel, NotifyError> {
        let g = self
            .inner
            .lock()
            .map_err(|e| NotifyError::Transport(format!("session registry lock poisoned: {e}")))?;
        match g.get(session_id) {
            Some(entry) if entry.status == SessionStatus::Connected => Ok(SessionChannel {
                session_id: session_id.clone(),
                topic: entry.topic.clone(),
            }),
            Some(_) => Err(NotifyError::SessionUnavailable(format!(
                "session disconnected: {session_id}"
            ))),
            None => Err(NotifyError::SessionUnavailable(format!(
                "unknown session: {session_id}"
            ))),
        }
    }
}

/// Sends transaction outcomes over the session relay, bounded by
/// `notify_timeout_ms`.
#[derive(Debug, Clone)]
pub struct WalletConnectNotifier {
    registry: SessionRegistry,
    timeout: Duration,
}

impl WalletConnectNotifier {
    pub fn new(registry: SessionRegistry) -> Self {
        Self::with_config(registry, AdapterConfig::default())
    }

    pub fn with_config(registry: SessionRegistry, config: AdapterConfig) -> Self {
        Self {
            registry,
            timeout: Duration::from_millis(config.notify_timeout_ms),
        }
    }
}

#[async_trait]
impl PeerNotifier for WalletConnectNotifier {
    async fn notify(
        &self,
        channel: &SessionChannel,
        outcome: &NotificationOutcome,
    ) -> Result<(), NotifyError> {
        let relay = self.registry.relay_for(&channel.session_id)?;
        let message = RelayMessage::from_outcome(&channel.topic, outcome);

        match tokio::time::timeout(self.timeout, relay.send(message)).await {
            Ok(Ok(())) => {
                debug!(topic = %channel.topic, request_id = %outcome.request_id, "relayed outcome");
                Ok(())
            }
            Ok(Err(_)) => {
                warn!(topic = %channel.topic, "relay closed by dapp");
                Err(NotifyError::Transport(format!(
                    "relay closed for topic {}",
                    channel.topic
                )))
            }
            Err(_) => Err(NotifyError::Timeout(self.timeout.as_millis() as u64)),
        }
    }
}
