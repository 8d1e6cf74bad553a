use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use dapp_confirm_core::{PendingRequestStore, RequestId, TransactionRequest};

use crate::AdapterError;

/// Requests waiting for the user, keyed by request id.
#[derive(Debug, Clone, Default)]
pub struct PendingRequestQueue {
    inner: Arc<Mutex<QueueState>>,
}

#[derive(Debug, Default)]
struct QueueState {
    requests: HashMap<RequestId, TransactionRequest>,
    removals: HashMap<RequestId, u32>,
}

impl PendingRequestQueue {
    pub fn insert(&self, request: TransactionRequest) -> Result<(), AdapterError> {
        let mut g = self
            .inner
            .lock()
            .map_err(|_| AdapterError::LockPoisoned("pending queue"))?;
        if g.requests.contains_key(&request.request_id) {
            return Err(AdapterError::Duplicate(request.request_id.to_string()));
        }
        g.requests.insert(request.request_id.clone(), request);
        Ok(())
    }

    pub fn get(&self, request_id: &RequestId) -> Option<TransactionRequest> {
        self.state().requests.get(request_id).cloned()
    }

    pub fn contains(&self, request_id: &RequestId) -> bool {
        self.state().requests.contains_key(request_id)
    }

    pub fn len(&self) -> usize {
        self.state().requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// How many times `remove` was called for this id, present or not.
    pub fn removal_count(&self, request_id: &RequestId) -> u32 {
        self.state()
            .removals
            .get(request_id)
            .copied()
            .unwrap_or_default()
    }

    // A poisoned queue still holds consistent maps; every mutation is a
    // single insert or remove.
    fn state(&self) -> MutexGuard<'_, QueueState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl PendingRequestStore for PendingRequestQueue {
    fn remove(&self, request_id: &RequestId) {
        let mut g = self.state();
        *g.removals.entry(request_id.clone()).or_default() += 1;
        if g.requests.remove(request_id).is_none() {
            debug!(%request_id, "pending request already removed");
        }
    }
}
