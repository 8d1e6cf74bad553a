use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Warning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowState {
    Ready,
    Submitting,
    Accepted,
    Rejected,
    SubmissionFailed,
    Cancelling,
    Notifying,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowAction {
    Submit,
    Cancel,
    Accept,
    Reject,
    Fail,
    Notify,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTransition {
    pub from: FlowState,
    pub to: FlowState,
    pub reason: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("flow is not ready (current state: {0:?})")]
    NotReady(FlowState),
    #[error("illegal flow transition: {from:?} on {action:?}")]
    IllegalTransition { from: FlowState, action: FlowAction },
    #[error("flow state lock poisoned")]
    StatePoisoned,
}

/// How a flow reached `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalPath {
    Accepted,
    Rejected,
    SubmissionFailed,
    Cancelled,
}

impl TerminalPath {
    /// Warning surfaced after the screen closes, given whether the peer
    /// notification went through.
    pub fn warning(self, delivered: bool) -> Option<Warning> {
        match (self, delivered) {
            (TerminalPath::Accepted, true) | (TerminalPath::Cancelled, true) => None,
            (TerminalPath::Accepted, false) => Some(Warning::RelayFailed),
            (TerminalPath::Cancelled, false) => Some(Warning::Cancelled),
            (TerminalPath::Rejected, _) | (TerminalPath::SubmissionFailed, _) => {
                Some(Warning::SubmissionFailed)
            }
        }
    }
}

pub fn flow_transition(
    state: FlowState,
    action: FlowAction,
) -> Result<(FlowState, StateTransition), FlowError> {
    use FlowAction as A;
    use FlowState as S;

    let (to, reason) = match (state, action) {
        (S::Ready, A::Submit) => (S::Submitting, "confirm"),
        (S::Ready, A::Cancel) => (S::Cancelling, "cancel"),
        (S::Submitting, A::Accept) => (S::Accepted, "receipt_with_hash"),
        (S::Submitting, A::Reject) => (S::Rejected, "no_usable_receipt"),
        (S::Submitting, A::Fail) => (S::SubmissionFailed, "submission_error"),
        (S::Accepted | S::Rejected | S::SubmissionFailed | S::Cancelling, A::Notify) => {
            (S::Notifying, "notify_peer")
        }
        (S::Notifying, A::Close) => (S::Closed, "close_screen"),
        (from, action) => return Err(FlowError::IllegalTransition { from, action }),
    };

    Ok((
        to,
        StateTransition {
            from: state,
            to,
            reason,
        },
    ))
}
