//! dapp-confirm: run a pending dapp transaction request through confirmation

use std::path::PathBuf;

use clap::Parser;
use eyre::WrapErr;

use dapp_confirm_core::TransactionRequest;

mod bridge;

use bridge::{BridgeOptions, ConfirmationBridge};

#[derive(Debug, Parser)]
#[command(name = "dapp-confirm", version, about)]
struct Cli {
    /// JSON file holding the pending transaction request
    request: PathBuf,

    /// Reject the request instead of confirming it
    #[arg(long)]
    cancel: bool,

    /// Simulate the user declining authentication
    #[arg(long)]
    decline_auth: bool,

    /// Disconnect the dapp session before the outcome is relayed
    #[arg(long)]
    drop_session: bool,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let raw = std::fs::read_to_string(&cli.request)
        .wrap_err_with(|| format!("reading {}", cli.request.display()))?;
    let request: TransactionRequest =
        serde_json::from_str(&raw).wrap_err("decoding transaction request")?;

    tracing::info!(request_id = %request.request_id, session_id = %request.session_id, "loaded request");

    let bridge = ConfirmationBridge::open(
        request,
        BridgeOptions {
            decline_auth: cli.decline_auth,
            drop_session: cli.drop_session,
        },
    )?;
    let summary = bridge.run(cli.cancel).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
