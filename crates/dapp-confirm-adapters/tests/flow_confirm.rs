mod common;

use dapp_confirm_adapters::{ProviderSubmitter, ScreenEvent, SessionRegistry};
use dapp_confirm_core::{
    FlowConfig, FlowState, NotificationOutcome, RequestId, SessionId, TerminalPath, Warning,
};

use common::{drain_relay, drain_screen, harness, harness_with, FlakyNotifier, ScriptedSubmitter};

#[tokio::test]
async fn accepted_receipt_notifies_hash_and_closes_quietly() {
    let mut h = harness("tx-1", ScriptedSubmitter::hash("0xabc"));
    let id = RequestId::from("tx-1");

    let report = h.flow.confirm().await.expect("confirm");

    assert_eq!(report.path, TerminalPath::Accepted);
    assert_eq!(
        report.notification,
        NotificationOutcome::accepted(id.clone(), "0xabc")
    );
    assert!(report.delivered);
    assert_eq!(report.warning, None);
    assert_eq!(h.flow.state().expect("state"), FlowState::Closed);

    let relayed = drain_relay(&mut h.relay);
    assert_eq!(relayed.len(), 1);
    assert!(relayed[0].approved);
    assert_eq!(relayed[0].result.as_deref(), Some("0xabc"));
    assert_eq!(relayed[0].topic, common::TOPIC);

    assert!(!h.flow.ports.store.contains(&id));
    assert_eq!(h.flow.ports.store.removal_count(&id), 1);
    assert_eq!(
        drain_screen(&mut h.screen),
        vec![ScreenEvent::Opened, ScreenEvent::Closed]
    );
}

#[tokio::test]
async fn accepted_transaction_is_recorded_on_account() {
    let h = harness("tx-2", ScriptedSubmitter::hash("0xdef"));

    let report = h.flow.confirm().await.expect("confirm");

    let details = report.details.expect("details for accepted tx");
    assert_eq!(details.hash, "0xdef");
    assert_eq!(details.amount.as_deref(), Some("0.1"));
    assert_eq!(details.asset.as_deref(), Some("ETH"));
    assert!(h.flow.ports.activity.has_pending_transaction());
    assert_eq!(h.flow.ports.activity.transactions(), vec![details]);
}

#[tokio::test]
async fn confirmation_label_comes_from_config() {
    let sessions = SessionRegistry::default();
    let submitter = ScriptedSubmitter::hash("0xabc");
    let h = harness_with(
        "tx-3",
        submitter.clone(),
        FlakyNotifier::default(),
        sessions,
        FlowConfig {
            confirmation_label: "Approve dapp transaction".to_owned(),
            ..FlowConfig::default()
        },
    );

    h.flow.confirm().await.expect("confirm");
    assert_eq!(submitter.labels(), vec!["Approve dapp transaction"]);
}

#[tokio::test]
async fn relay_failure_after_accept_warns_without_undoing_removal() {
    let mut h = harness("tx-4", ScriptedSubmitter::hash("0xabc"));
    let id = RequestId::from("tx-4");
    h.relay.close();

    let report = h.flow.confirm().await.expect("confirm");

    assert_eq!(report.path, TerminalPath::Accepted);
    assert!(!report.delivered);
    assert_eq!(report.warning, Some(Warning::RelayFailed));
    assert_eq!(h.flow.ports.store.removal_count(&id), 1);
    assert!(h.flow.ports.activity.has_pending_transaction());
    assert_eq!(
        drain_screen(&mut h.screen),
        vec![
            ScreenEvent::Opened,
            ScreenEvent::Closed,
            ScreenEvent::Warning(Warning::RelayFailed)
        ]
    );
}

#[tokio::test]
async fn disconnected_session_is_reported_as_relay_failure() {
    let h = harness("tx-5", ScriptedSubmitter::hash("0xabc"));
    h.flow
        .ports
        .sessions
        .disconnect(&SessionId::from(common::SESSION))
        .expect("disconnect");

    let report = h.flow.confirm().await.expect("confirm");
    assert_eq!(report.warning, Some(Warning::RelayFailed));
    assert_eq!(h.flow.state().expect("state"), FlowState::Closed);
}

#[tokio::test]
async fn provider_submitter_round_trip() {
    let submitter = ProviderSubmitter::default();
    submitter.set_authenticated(true);
    let mut h = harness("tx-6", submitter.clone());

    let report = h.flow.confirm().await.expect("confirm");

    assert_eq!(report.path, TerminalPath::Accepted);
    let hash = report
        .notification
        .result_hash
        .clone()
        .expect("accepted hash");
    assert!(hash.starts_with("0x"));
    assert_eq!(hash.len(), 66);
    assert_eq!(submitter.broadcast_count(), 1);
    assert_eq!(submitter.last_label().as_deref(), Some("Confirm transaction"));
    assert_eq!(drain_relay(&mut h.relay)[0].result, Some(hash));
}
