use std::fmt;

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub String);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RequestId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Signable transaction data exactly as the dapp sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionPayload(pub Value);

impl TransactionPayload {
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }
}

/// Presentation fields derived upstream from the payload. Never mutated here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplayMetadata {
    pub value: Option<String>,
    pub native_amount: Option<String>,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub from: Option<Address>,
    pub to: Option<Address>,
    pub gas_limit: Option<String>,
    pub gas_price: Option<String>,
    pub nonce: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub request_id: RequestId,
    pub session_id: SessionId,
    pub payload: TransactionPayload,
    #[serde(default)]
    pub display: DisplayMetadata,
    #[serde(default)]
    pub dapp_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub hash: String,
}

impl TransactionReceipt {
    pub fn new(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// The broadcast hash, or `None` when the network gave nothing usable.
    pub fn accepted_hash(&self) -> Option<&str> {
        let hash = self.hash.trim();
        (!hash.is_empty()).then_some(hash)
    }
}

/// What the originating dapp session is told about its request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationOutcome {
    pub request_id: RequestId,
    pub accepted: bool,
    pub result_hash: Option<String>,
}

impl NotificationOutcome {
    pub fn accepted(request_id: RequestId, hash: impl Into<String>) -> Self {
        Self {
            request_id,
            accepted: true,
            result_hash: Some(hash.into()),
        }
    }

    pub fn rejected(request_id: RequestId) -> Self {
        Self {
            request_id,
            accepted: false,
            result_hash: None,
        }
    }
}

/// Handle to an open dapp session, resolved from a [`SessionId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionChannel {
    pub session_id: SessionId,
    pub topic: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Warning {
    RelayFailed,
    SubmissionFailed,
    Cancelled,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Warning::RelayFailed => "relay-failed",
            Warning::SubmissionFailed => "submission-failed",
            Warning::Cancelled => "cancelled",
        })
    }
}
