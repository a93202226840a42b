//! Logging collaborator for persistence failures.

use tracing::error;

/// Receives store failures surfaced by a content resource.
///
/// Only persistence failures are reported here; access and validation
/// errors are ordinary responses.
pub trait FailureLog: Send + Sync {
    fn persistence_failed(&self, operation: &'static str, error: &anyhow::Error);
}

/// Writes failures to the tracing system under a named channel.
#[derive(Debug, Clone)]
pub struct TracingFailureLog {
    channel: &'static str,
}

impl TracingFailureLog {
    pub fn new(channel: &'static str) -> Self {
        Self { channel }
    }
}

impl FailureLog for TracingFailureLog {
    fn persistence_failed(&self, operation: &'static str, error: &anyhow::Error) {
        error!(
            channel = self.channel,
            operation,
            error = %format!("{error:#}"),
            "content store operation failed"
        );
    }
}
