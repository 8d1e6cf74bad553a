use async_trait::async_trait;
use thiserror::Error;

use crate::display::TransactionDetails;
use crate::domain::{
    NotificationOutcome, RequestId, SessionChannel, SessionId, TransactionPayload,
    TransactionReceipt, Warning,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("authentication declined")]
    AuthenticationDeclined,
    #[error("signing failed: {0}")]
    Signing(String),
    #[error("network error: {0}")]
    Network(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    #[error("session unavailable: {0}")]
    SessionUnavailable(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("notification timed out after {0}ms")]
    Timeout(u64),
}

impl NotifyError {
    /// A closed or unknown session will not come back within one flow.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, NotifyError::SessionUnavailable(_))
    }
}

#[async_trait]
pub trait TransactionSubmitter: Send + Sync {
    /// `Ok(None)` means the submission completed without a usable receipt.
    async fn submit(
        &self,
        payload: &TransactionPayload,
        confirmation_label: &str,
    ) -> Result<Option<TransactionReceipt>, SubmissionError>;
}

#[async_trait]
pub trait PeerNotifier: Send + Sync {
    async fn notify(
        &self,
        channel: &SessionChannel,
        outcome: &NotificationOutcome,
    ) -> Result<(), NotifyError>;
}

pub trait SessionResolver: Send + Sync {
    fn resolve(&self, session_id: &SessionId) -> Result<SessionChannel, NotifyError>;
}

/// Removing an absent id is not an error.
pub trait PendingRequestStore: Send + Sync {
    fn remove(&self, request_id: &RequestId);
}

pub trait AccountActivity: Send + Sync {
    fn mark_pending(&self);
    fn record_transaction(&self, details: &TransactionDetails);
}

pub trait ConfirmationScreen: Send + Sync {
    fn on_opened(&self) {}
    fn on_closed(&self);
    fn on_warning(&self, warning: Warning);
}
