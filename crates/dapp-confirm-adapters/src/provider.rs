use std::sync::{Arc, Mutex};

use alloy::primitives::keccak256;
use async_trait::async_trait;
use tracing::info;

use dapp_confirm_core::{
    SubmissionError, TransactionPayload, TransactionReceipt, TransactionSubmitter,
};

use crate::AdapterConfig;

/// Deterministic wallet provider: gates submission on user authentication
/// and derives the broadcast hash from the payload bytes.
#[derive(Debug, Clone)]
pub struct ProviderSubmitter {
    requires_authentication: bool,
    state: Arc<Mutex<ProviderState>>,
}

#[derive(Debug, Default)]
struct ProviderState {
    authenticated: bool,
    broadcast: Vec<TransactionPayload>,
    last_label: Option<String>,
}

impl Default for ProviderSubmitter {
    fn default() -> Self {
        Self::with_config(AdapterConfig::default())
    }
}

impl ProviderSubmitter {
    pub fn with_config(config: AdapterConfig) -> Self {
        Self {
            requires_authentication: config.submit_requires_authentication,
            state: Arc::new(Mutex::new(ProviderState::default())),
        }
    }

    pub fn set_authenticated(&self, authenticated: bool) {
        if let Ok(mut g) = self.state.lock() {
            g.authenticated = authenticated;
        }
    }

    pub fn broadcast_count(&self) -> usize {
        self.state.lock().map(|g| g.broadcast.len()).unwrap_or_default()
    }

    pub fn last_label(&self) -> Option<String> {
        self.state.lock().ok().and_then(|g| g.last_label.clone())
    }
}

#[async_trait]
impl TransactionSubmitter for ProviderSubmitter {
    async fn submit(
        &self,
        payload: &TransactionPayload,
        confirmation_label: &str,
    ) -> Result<Option<TransactionReceipt>, SubmissionError> {
        let mut g = self
            .state
            .lock()
            .map_err(|e| SubmissionError::Signing(format!("provider lock poisoned: {e}")))?;
        g.last_label = Some(confirmation_label.to_owned());
        if self.requires_authentication && !g.authenticated {
            return Err(SubmissionError::AuthenticationDeclined);
        }
        // Nothing to broadcast; the node answers without a hash.
        if payload.is_empty() {
            return Ok(None);
        }

        let encoded = serde_json::to_vec(&payload.0)
            .map_err(|e| SubmissionError::Signing(format!("payload encoding failed: {e}")))?;
        let hash = keccak256(encoded);
        g.broadcast.push(payload.clone());
        info!(%hash, "broadcast transaction");
        Ok(Some(TransactionReceipt::new(hash.to_string())))
    }
}
