pub mod account;
pub mod config;
pub mod error;
pub mod provider;
pub mod queue;
pub mod screen;
pub mod wc;

pub use account::AccountLedger;
pub use config::AdapterConfig;
pub use error::AdapterError;
pub use provider::ProviderSubmitter;
pub use queue::PendingRequestQueue;
pub use screen::{ScreenEvent, ScreenEvents};
pub use wc::{RelayMessage, SessionRegistry, SessionStatus, WalletConnectNotifier};
