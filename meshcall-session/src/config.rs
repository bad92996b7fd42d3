use crate::transport::TransportConfig;
use std::time::Duration;

/// Per-session tuning. The transport part is static relay/reflection
/// configuration handed to every new connection; the timeout bounds each
/// individual negotiation step (create/apply description) so a step that
/// never resolves is reported instead of suspending forever.
#[derive(Clone)]
pub struct SessionConfig {
    pub transport: TransportConfig,
    pub negotiation_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            transport: TransportConfig::default(),
            negotiation_timeout: Duration::from_secs(10),
        }
    }
}
