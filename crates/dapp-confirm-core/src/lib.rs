pub mod config;
pub mod display;
pub mod domain;
pub mod flow;
pub mod ports;
pub mod state_machine;

pub use config::{FlowConfig, NotifyRetryPolicy};
pub use display::{to_asset_summary, to_display_details, AssetSummary, TransactionDetails};
pub use domain::{
    DisplayMetadata, NotificationOutcome, RequestId, SessionChannel, SessionId,
    TransactionPayload, TransactionReceipt, TransactionRequest, Warning,
};
pub use flow::{ConfirmationFlow, FlowPorts, FlowReport};
pub use ports::{
    AccountActivity, ConfirmationScreen, NotifyError, PeerNotifier, PendingRequestStore,
    SessionResolver, SubmissionError, TransactionSubmitter,
};
pub use state_machine::{
    flow_transition, FlowAction, FlowError, FlowState, StateTransition, TerminalPath,
};
