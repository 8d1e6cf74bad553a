#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{mpsc, Notify};

use dapp_confirm_adapters::{
    AccountLedger, PendingRequestQueue, RelayMessage, ScreenEvent, ScreenEvents, SessionRegistry,
    WalletConnectNotifier,
};
use dapp_confirm_core::{
    ConfirmationFlow, FlowConfig, FlowPorts, NotificationOutcome, NotifyError, PeerNotifier,
    SessionChannel, SessionId, SubmissionError, TransactionPayload, TransactionReceipt,
    TransactionRequest, TransactionSubmitter,
};

pub const SESSION: &str = "session-a";
pub const TOPIC: &str = "topic-a";

/// Submitter returning a fixed result, optionally held until released.
#[derive(Debug, Clone)]
pub struct ScriptedSubmitter {
    result: Result<Option<TransactionReceipt>, SubmissionError>,
    calls: Arc<AtomicUsize>,
    gate: Option<Arc<Notify>>,
    labels: Arc<Mutex<Vec<String>>>,
}

impl ScriptedSubmitter {
    pub fn returning(result: Result<Option<TransactionReceipt>, SubmissionError>) -> Self {
        Self {
            result,
            calls: Arc::new(AtomicUsize::new(0)),
            gate: None,
            labels: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn hash(hash: &str) -> Self {
        Self::returning(Ok(Some(TransactionReceipt::new(hash))))
    }

    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn labels(&self) -> Vec<String> {
        self.labels.lock().expect("labels lock").clone()
    }
}

#[async_trait]
impl TransactionSubmitter for ScriptedSubmitter {
    async fn submit(
        &self,
        _payload: &TransactionPayload,
        confirmation_label: &str,
    ) -> Result<Option<TransactionReceipt>, SubmissionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.labels
            .lock()
            .expect("labels lock")
            .push(confirmation_label.to_owned());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.result.clone()
    }
}

/// Notifier failing the first `failures` calls with a transport error.
#[derive(Debug, Clone, Default)]
pub struct FlakyNotifier {
    failures: usize,
    calls: Arc<AtomicUsize>,
    delivered: Arc<Mutex<Vec<NotificationOutcome>>>,
}

impl FlakyNotifier {
    pub fn failing(failures: usize) -> Self {
        Self {
            failures,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn delivered(&self) -> Vec<NotificationOutcome> {
        self.delivered.lock().expect("delivered lock").clone()
    }
}

#[async_trait]
impl PeerNotifier for FlakyNotifier {
    async fn notify(
        &self,
        _channel: &SessionChannel,
        outcome: &NotificationOutcome,
    ) -> Result<(), NotifyError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            return Err(NotifyError::Transport("relay unreachable".to_owned()));
        }
        self.delivered
            .lock()
            .expect("delivered lock")
            .push(outcome.clone());
        Ok(())
    }
}

pub type TestFlow<T, N> =
    ConfirmationFlow<T, N, SessionRegistry, PendingRequestQueue, AccountLedger, ScreenEvents>;

pub struct Harness<T, N>
where
    T: TransactionSubmitter,
    N: PeerNotifier,
{
    pub flow: TestFlow<T, N>,
    pub relay: mpsc::Receiver<RelayMessage>,
    pub screen: mpsc::UnboundedReceiver<ScreenEvent>,
}

pub fn request(id: &str) -> TransactionRequest {
    serde_json::from_value(serde_json::json!({
        "requestId": id,
        "sessionId": SESSION,
        "payload": {
            "from": "0x1000000000000000000000000000000000000001",
            "to": "0x000000000000000000000000000000000000CAFE",
            "value": "0x16345785d8a0000",
            "gasLimit": "0x5208",
            "gasPrice": "0x3b9aca00",
            "nonce": "0x7"
        },
        "display": {
            "value": "0.1",
            "symbol": "ETH",
            "from": "0x1000000000000000000000000000000000000001",
            "to": "0x000000000000000000000000000000000000CAFE",
            "gasLimit": "21000",
            "gasPrice": "1000000000",
            "nonce": 7
        },
        "dappName": "Example Dapp"
    }))
    .expect("valid request fixture")
}

/// Flow over the real adapters, with the request queued and its session
/// connected.
pub fn harness<T>(id: &str, submitter: T) -> Harness<T, WalletConnectNotifier>
where
    T: TransactionSubmitter,
{
    let sessions = SessionRegistry::default();
    let notifier = WalletConnectNotifier::new(sessions.clone());
    harness_with(id, submitter, notifier, sessions, FlowConfig::default())
}

pub fn harness_with<T, N>(
    id: &str,
    submitter: T,
    notifier: N,
    sessions: SessionRegistry,
    config: FlowConfig,
) -> Harness<T, N>
where
    T: TransactionSubmitter,
    N: PeerNotifier,
{
    let relay = sessions
        .connect(SessionId::from(SESSION), TOPIC, 8)
        .expect("connect session");
    let store = PendingRequestQueue::default();
    let req = request(id);
    store.insert(req.clone()).expect("queue request");
    let (screen_events, screen) = ScreenEvents::channel();

    let flow = ConfirmationFlow::open(
        req,
        config,
        FlowPorts {
            submitter,
            notifier,
            sessions,
            store,
            activity: AccountLedger::default(),
            screen: screen_events,
        },
    );
    Harness {
        flow,
        relay,
        screen,
    }
}

pub fn drain_screen(rx: &mut mpsc::UnboundedReceiver<ScreenEvent>) -> Vec<ScreenEvent> {
    let mut out = Vec::new();
    while let Ok(event) = rx.try_recv() {
        out.push(event);
    }
    out
}

pub fn drain_relay(rx: &mut mpsc::Receiver<RelayMessage>) -> Vec<RelayMessage> {
    let mut out = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        out.push(msg);
    }
    out
}
