use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::error::LlmError;

/// Per-call deadline and cancellation, supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    timeout: Option<Duration>,
    cancellation: Option<CancellationToken>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deadline for this call. The client timeout still applies if it is shorter.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    pub(crate) fn effective_timeout(&self, client_timeout: Duration) -> Duration {
        self.timeout
            .map_or(client_timeout, |timeout| timeout.min(client_timeout))
    }

    /// Drive `fut` under this context. Cancellation is checked first, so an
    /// already-cancelled token never lets `fut` start.
    pub(crate) async fn run<F, T>(&self, client_timeout: Duration, fut: F) -> Result<T, LlmError>
    where
        F: Future<Output = Result<T, LlmError>>,
    {
        let timeout = self.effective_timeout(client_timeout);
        let bounded = async {
            match tokio::time::timeout(timeout, fut).await {
                Ok(result) => result,
                Err(_) => Err(LlmError::Timeout { timeout }),
            }
        };

        match &self.cancellation {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(LlmError::Cancelled),
                    result = bounded => result,
                }
            }
            None => bounded.await,
        }
    }
}
