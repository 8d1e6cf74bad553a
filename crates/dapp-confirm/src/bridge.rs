//! Bridge between the command line shell and the confirmation crates.
//! This must remain the only shell-facing boundary for flow operations.

use serde::Serialize;
use tokio::sync::mpsc;

use dapp_confirm_adapters::{
    AccountLedger, AdapterConfig, PendingRequestQueue, ProviderSubmitter, RelayMessage,
    ScreenEvent, ScreenEvents, SessionRegistry, WalletConnectNotifier,
};
use dapp_confirm_core::{
    ConfirmationFlow, FlowConfig, FlowPorts, FlowReport, TransactionDetails, TransactionRequest,
};

type CliFlow = ConfirmationFlow<
    ProviderSubmitter,
    WalletConnectNotifier,
    SessionRegistry,
    PendingRequestQueue,
    AccountLedger,
    ScreenEvents,
>;

#[derive(Debug, Clone, Default)]
pub struct BridgeOptions {
    pub decline_auth: bool,
    pub drop_session: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub report: FlowReport,
    pub relayed: Vec<RelayMessage>,
    pub screen: Vec<ScreenEvent>,
    pub pending_requests: usize,
    pub account_transactions: Vec<TransactionDetails>,
}

pub struct ConfirmationBridge {
    flow: CliFlow,
    relay: mpsc::Receiver<RelayMessage>,
    screen: mpsc::UnboundedReceiver<ScreenEvent>,
}

impl ConfirmationBridge {
    pub fn open(request: TransactionRequest, options: BridgeOptions) -> eyre::Result<Self> {
        let adapter_config = AdapterConfig::from_env();
        let sessions = SessionRegistry::default();
        let topic = format!("wc:{}", request.session_id);
        let relay = sessions.connect(
            request.session_id.clone(),
            topic,
            adapter_config.relay_buffer,
        )?;
        if options.drop_session {
            sessions.disconnect(&request.session_id)?;
        }

        let store = PendingRequestQueue::default();
        store.insert(request.clone())?;

        let submitter = ProviderSubmitter::with_config(adapter_config.clone());
        submitter.set_authenticated(!options.decline_auth);
        let (screen_events, screen) = ScreenEvents::channel();

        let flow = ConfirmationFlow::open(
            request,
            FlowConfig::from_env(),
            FlowPorts {
                submitter,
                notifier: WalletConnectNotifier::with_config(sessions.clone(), adapter_config),
                sessions,
                store,
                activity: AccountLedger::default(),
                screen: screen_events,
            },
        );

        Ok(Self {
            flow,
            relay,
            screen,
        })
    }

    pub async fn run(mut self, cancel: bool) -> eyre::Result<RunSummary> {
        tracing::info!(summary = ?self.flow.asset_summary(), "showing confirmation");
        let report = if cancel {
            self.flow.cancel().await?
        } else {
            self.flow.confirm().await?
        };

        let mut relayed = Vec::new();
        while let Ok(msg) = self.relay.try_recv() {
            relayed.push(msg);
        }
        let mut screen = Vec::new();
        while let Ok(event) = self.screen.try_recv() {
            screen.push(event);
        }

        Ok(RunSummary {
            report,
            relayed,
            screen,
            pending_requests: self.flow.ports.store.len(),
            account_transactions: self.flow.ports.activity.transactions(),
        })
    }
}
