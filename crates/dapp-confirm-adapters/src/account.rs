use std::sync::{Arc, Mutex};

use dapp_confirm_core::{AccountActivity, TransactionDetails};

#[derive(Debug, Clone, Default)]
pub struct AccountLedger {
    inner: Arc<Mutex<LedgerState>>,
}

#[derive(Debug, Default)]
struct LedgerState {
    has_pending: bool,
    transactions: Vec<TransactionDetails>,
}

impl AccountLedger {
    pub fn has_pending_transaction(&self) -> bool {
        self.inner.lock().map(|g| g.has_pending).unwrap_or_default()
    }

    /// Newest first.
    pub fn transactions(&self) -> Vec<TransactionDetails> {
        self.inner
            .lock()
            .map(|g| g.transactions.clone())
            .unwrap_or_default()
    }
}

impl AccountActivity for AccountLedger {
    fn mark_pending(&self) {
        let mut g = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        g.has_pending = true;
    }

    fn record_transaction(&self, details: &TransactionDetails) {
        let mut g = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        g.transactions.insert(0, details.clone());
    }
}
