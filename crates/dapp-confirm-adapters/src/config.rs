#[derive(Debug, Clone)]
pub struct AdapterConfig {
    pub notify_timeout_ms: u64,
    pub relay_buffer: usize,
    pub submit_requires_authentication: bool,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            notify_timeout_ms: 15_000,
            relay_buffer: 16,
            submit_requires_authentication: true,
        }
    }
}

impl AdapterConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(v) = std::env::var("DAPP_CONFIRM_NOTIFY_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
        {
            cfg.notify_timeout_ms = v;
        }
        if let Some(v) = std::env::var("DAPP_CONFIRM_RELAY_BUFFER")
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
        {
            cfg.relay_buffer = v.max(1);
        }
        cfg
    }
}
