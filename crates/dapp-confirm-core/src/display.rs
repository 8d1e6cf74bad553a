//! Typed projections of a request for the confirmation screen and the
//! account's transaction history.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::domain::TransactionRequest;

pub const DEFAULT_AMOUNT: &str = "0.00";
pub const DEFAULT_ASSET_NAME: &str = "No data";
pub const DEFAULT_SYMBOL: &str = "N/A";

/// What the confirmation screen shows before the user decides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetSummary {
    pub address: Option<Address>,
    pub amount: String,
    pub dapp_name: String,
    pub name: String,
    pub native_amount: Option<String>,
    pub symbol: String,
}

/// History record appended to the account once a transaction is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetails {
    pub amount: Option<String>,
    pub asset: Option<String>,
    pub from: Option<Address>,
    pub to: Option<Address>,
    pub gas_limit: Option<String>,
    pub gas_price: Option<String>,
    pub nonce: Option<u64>,
    pub hash: String,
}

pub fn to_asset_summary(request: &TransactionRequest) -> AssetSummary {
    let display = &request.display;
    AssetSummary {
        address: display.to,
        amount: display
            .value
            .clone()
            .unwrap_or_else(|| DEFAULT_AMOUNT.to_owned()),
        dapp_name: request.dapp_name.clone().unwrap_or_default(),
        name: display
            .name
            .clone()
            .unwrap_or_else(|| DEFAULT_ASSET_NAME.to_owned()),
        native_amount: display.native_amount.clone(),
        symbol: display
            .symbol
            .clone()
            .unwrap_or_else(|| DEFAULT_SYMBOL.to_owned()),
    }
}

pub fn to_display_details(request: &TransactionRequest, hash: &str) -> TransactionDetails {
    let display = &request.display;
    TransactionDetails {
        amount: display.value.clone(),
        asset: display.symbol.clone(),
        from: display.from,
        to: display.to,
        gas_limit: display.gas_limit.clone(),
        gas_price: display.gas_price.clone(),
        nonce: display.nonce,
        hash: hash.to_owned(),
    }
}
