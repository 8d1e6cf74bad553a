use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::FlowConfig;
use crate::display::{to_asset_summary, to_display_details, AssetSummary, TransactionDetails};
use crate::domain::{NotificationOutcome, TransactionReceipt, TransactionRequest, Warning};
use crate::ports::{
    AccountActivity, ConfirmationScreen, NotifyError, PeerNotifier, PendingRequestStore,
    SessionResolver, SubmissionError, TransactionSubmitter,
};
use crate::state_machine::{
    flow_transition, FlowAction, FlowError, FlowState, StateTransition, TerminalPath,
};

/// Collaborators a flow drives. Fields stay public so callers can inspect
/// their adapters after the flow closes.
pub struct FlowPorts<T, N, R, S, A, U> {
    pub submitter: T,
    pub notifier: N,
    pub sessions: R,
    pub store: S,
    pub activity: A,
    pub screen: U,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowReport {
    pub path: TerminalPath,
    pub notification: NotificationOutcome,
    pub delivered: bool,
    pub warning: Option<Warning>,
    pub details: Option<TransactionDetails>,
}

enum SubmitOutcome {
    Accepted(String),
    Rejected,
    Failed(SubmissionError),
}

impl SubmitOutcome {
    fn classify(result: Result<Option<TransactionReceipt>, SubmissionError>) -> Self {
        match result {
            Ok(Some(receipt)) => match receipt.accepted_hash() {
                Some(hash) => SubmitOutcome::Accepted(hash.to_owned()),
                None => SubmitOutcome::Rejected,
            },
            Ok(None) => SubmitOutcome::Rejected,
            Err(err) => SubmitOutcome::Failed(err),
        }
    }
}

#[derive(Debug)]
struct FlowInner {
    state: FlowState,
    consumed: bool,
    transitions: Vec<StateTransition>,
}

/// Single-use confirmation flow for one pending dapp transaction.
pub struct ConfirmationFlow<T, N, R, S, A, U>
where
    T: TransactionSubmitter,
    N: PeerNotifier,
    R: SessionResolver,
    S: PendingRequestStore,
    A: AccountActivity,
    U: ConfirmationScreen,
{
    pub ports: FlowPorts<T, N, R, S, A, U>,
    config: FlowConfig,
    request: TransactionRequest,
    inner: Mutex<FlowInner>,
}

impl<T, N, R, S, A, U> ConfirmationFlow<T, N, R, S, A, U>
where
    T: TransactionSubmitter,
    N: PeerNotifier,
    R: SessionResolver,
    S: PendingRequestStore,
    A: AccountActivity,
    U: ConfirmationScreen,
{
    pub fn new(
        request: TransactionRequest,
        config: FlowConfig,
        ports: FlowPorts<T, N, R, S, A, U>,
    ) -> Self {
        Self {
            ports,
            config,
            request,
            inner: Mutex::new(FlowInner {
                state: FlowState::Ready,
                consumed: false,
                transitions: Vec::new(),
            }),
        }
    }

    /// Builds the flow and tells the screen it is showing.
    pub fn open(
        request: TransactionRequest,
        config: FlowConfig,
        ports: FlowPorts<T, N, R, S, A, U>,
    ) -> Self {
        let flow = Self::new(request, config, ports);
        flow.ports.screen.on_opened();
        flow
    }

    pub fn request(&self) -> &TransactionRequest {
        &self.request
    }

    pub fn asset_summary(&self) -> AssetSummary {
        to_asset_summary(&self.request)
    }

    pub fn state(&self) -> Result<FlowState, FlowError> {
        Ok(self.lock()?.state)
    }

    pub fn transitions(&self) -> Result<Vec<StateTransition>, FlowError> {
        Ok(self.lock()?.transitions.clone())
    }

    pub async fn confirm(&self) -> Result<FlowReport, FlowError> {
        self.begin(FlowAction::Submit)?;
        info!(request_id = %self.request.request_id, "submitting dapp transaction");

        let result = self
            .ports
            .submitter
            .submit(&self.request.payload, &self.config.confirmation_label)
            .await;

        match SubmitOutcome::classify(result) {
            SubmitOutcome::Accepted(hash) => {
                self.advance(FlowAction::Accept)?;
                let details = to_display_details(&self.request, &hash);
                self.ports.activity.mark_pending();
                self.ports.activity.record_transaction(&details);
                let outcome = NotificationOutcome::accepted(self.request.request_id.clone(), hash);
                self.settle(TerminalPath::Accepted, outcome, Some(details))
                    .await
            }
            SubmitOutcome::Rejected => {
                warn!(request_id = %self.request.request_id, "submission produced no usable receipt");
                self.advance(FlowAction::Reject)?;
                self.settle_rejected(TerminalPath::Rejected).await
            }
            SubmitOutcome::Failed(err) => {
                warn!(request_id = %self.request.request_id, error = %err, "submission failed");
                self.advance(FlowAction::Fail)?;
                self.settle_rejected(TerminalPath::SubmissionFailed).await
            }
        }
    }

    pub async fn cancel(&self) -> Result<FlowReport, FlowError> {
        self.begin(FlowAction::Cancel)?;
        info!(request_id = %self.request.request_id, "cancelling dapp transaction");
        self.settle_rejected(TerminalPath::Cancelled).await
    }

    async fn settle_rejected(&self, path: TerminalPath) -> Result<FlowReport, FlowError> {
        let outcome = NotificationOutcome::rejected(self.request.request_id.clone());
        self.settle(path, outcome, None).await
    }

    /// Shared tail of every terminal path: consume the request, notify the
    /// peer, close, then warn. Collaborator failures never escape.
    async fn settle(
        &self,
        path: TerminalPath,
        outcome: NotificationOutcome,
        details: Option<TransactionDetails>,
    ) -> Result<FlowReport, FlowError> {
        self.consume()?;
        self.advance(FlowAction::Notify)?;
        let delivered = match self.deliver(&outcome).await {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    request_id = %self.request.request_id,
                    error = %err,
                    "could not relay transaction status to dapp"
                );
                false
            }
        };

        self.advance(FlowAction::Close)?;
        self.ports.screen.on_closed();
        let warning = path.warning(delivered);
        if let Some(warning) = warning {
            self.ports.screen.on_warning(warning);
        }
        info!(
            request_id = %self.request.request_id,
            ?path,
            delivered,
            "confirmation flow closed"
        );

        Ok(FlowReport {
            path,
            notification: outcome,
            delivered,
            warning,
            details,
        })
    }

    fn consume(&self) -> Result<(), FlowError> {
        {
            let mut inner = self.lock()?;
            if inner.consumed {
                debug!(request_id = %self.request.request_id, "request already consumed");
                return Ok(());
            }
            inner.consumed = true;
        }
        self.ports.store.remove(&self.request.request_id);
        Ok(())
    }

    async fn deliver(&self, outcome: &NotificationOutcome) -> Result<(), NotifyError> {
        let policy = self.config.notify_retry;
        let mut attempt = 1;
        loop {
            let result = match self.ports.sessions.resolve(&self.request.session_id) {
                Ok(channel) => self.ports.notifier.notify(&channel, outcome).await,
                Err(err) => Err(err),
            };
            match result {
                Ok(()) => return Ok(()),
                Err(err) if err.is_retryable() && attempt < policy.attempts() => {
                    debug!(attempt, error = %err, "retrying peer notification");
                    attempt += 1;
                    tokio::time::sleep(policy.backoff()).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Leaves `Ready` atomically; a second caller sees `NotReady`.
    fn begin(&self, action: FlowAction) -> Result<(), FlowError> {
        let mut inner = self.lock()?;
        if inner.state != FlowState::Ready {
            return Err(FlowError::NotReady(inner.state));
        }
        Self::apply(&mut inner, action)
    }

    fn advance(&self, action: FlowAction) -> Result<(), FlowError> {
        let mut inner = self.lock()?;
        Self::apply(&mut inner, action)
    }

    fn apply(inner: &mut FlowInner, action: FlowAction) -> Result<(), FlowError> {
        let (state, transition) = flow_transition(inner.state, action)?;
        debug!(from = ?transition.from, to = ?transition.to, reason = transition.reason);
        inner.state = state;
        inner.transitions.push(transition);
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, FlowInner>, FlowError> {
        self.inner.lock().map_err(|_| FlowError::StatePoisoned)
    }
}
