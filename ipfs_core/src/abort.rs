//! Abort flag shared between a blocking request and other threads.

use tokio::sync::watch;

use crate::transport::TransportError;

/// Abort state of one transport.
///
/// `abort` may be called from any thread while a request is in flight;
/// the request observes it through [`AbortSignal::aborted`], which
/// completes as soon as the flag is raised. The flag stays raised until
/// [`AbortSignal::reset`], so calls issued in between are refused.
///
/// A signal is never shared between transports: cloning a transport
/// creates a fresh signal.
#[derive(Debug)]
pub struct AbortSignal {
    flag: watch::Sender<bool>,
}

impl AbortSignal {
    pub fn new() -> Self {
        Self {
            flag: watch::Sender::new(false),
        }
    }

    /// Raises the flag and wakes every request waiting on it.
    pub fn abort(&self) {
        if !self.flag.send_replace(true) {
            tracing::debug!("abort requested");
        }
    }

    /// Clears the flag so the transport accepts requests again.
    pub fn reset(&self) {
        self.flag.send_replace(false);
    }

    pub fn is_aborted(&self) -> bool {
        *self.flag.borrow()
    }

    /// Fails with [`TransportError::Aborted`] while the flag is raised.
    pub fn check(&self) -> Result<(), TransportError> {
        if self.is_aborted() {
            Err(TransportError::Aborted)
        } else {
            Ok(())
        }
    }

    /// Completes once the flag is raised (immediately if it already is).
    pub async fn aborted(&self) {
        let mut rx = self.flag.subscribe();
        // The sender lives in `self`, so the channel cannot close under us.
        let _ = rx.wait_for(|aborted| *aborted).await;
    }
}

impl Default for AbortSignal {
    fn default() -> Self {
        Self::new()
    }
}
