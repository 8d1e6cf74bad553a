use serde::Serialize;
use tokio::sync::mpsc;

use dapp_confirm_core::{ConfirmationScreen, Warning};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "warning", rename_all = "snake_case")]
pub enum ScreenEvent {
    Opened,
    Closed,
    Warning(Warning),
}

/// Forwards screen signals to the presentation layer. Events sent after the
/// receiver is dropped are discarded.
#[derive(Debug, Clone)]
pub struct ScreenEvents {
    tx: mpsc::UnboundedSender<ScreenEvent>,
}

impl ScreenEvents {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ScreenEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn emit(&self, event: ScreenEvent) {
        let _ = self.tx.send(event);
    }
}

impl ConfirmationScreen for ScreenEvents {
    fn on_opened(&self) {
        self.emit(ScreenEvent::Opened);
    }

    fn on_closed(&self) {
        self.emit(ScreenEvent::Closed);
    }

    fn on_warning(&self, warning: Warning) {
        self.emit(ScreenEvent::Warning(warning));
    }
}
