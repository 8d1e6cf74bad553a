use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_CONFIRMATION_LABEL: &str = "Confirm transaction";

/// Notification retry. One attempt, i.e. no retry, unless configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotifyRetryPolicy {
    pub max_attempts: u32,
    pub backoff_ms: u64,
}

impl Default for NotifyRetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            backoff_ms: 0,
        }
    }
}

impl NotifyRetryPolicy {
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    pub confirmation_label: String,
    pub notify_retry: NotifyRetryPolicy,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            confirmation_label: DEFAULT_CONFIRMATION_LABEL.to_owned(),
            notify_retry: NotifyRetryPolicy::default(),
        }
    }
}

impl FlowConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(label) = std::env::var("DAPP_CONFIRM_LABEL") {
            if !label.trim().is_empty() {
                cfg.confirmation_label = label;
            }
        }
        if let Some(attempts) = env_parse::<u32>("DAPP_CONFIRM_NOTIFY_ATTEMPTS") {
            cfg.notify_retry.max_attempts = attempts;
        }
        if let Some(backoff) = env_parse::<u64>("DAPP_CONFIRM_NOTIFY_BACKOFF_MS") {
            cfg.notify_retry.backoff_ms = backoff;
        }
        cfg
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
