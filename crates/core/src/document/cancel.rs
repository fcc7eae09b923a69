use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::error::{DossierError, Result};

/// Cooperative cancellation shared between a caller and long-running work.
/// Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a token sharing the cancellation flag which additionally
    /// expires at `deadline`.
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let deadline = match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        };
        Self {
            cancelled: Arc::clone(&self.cancelled),
            deadline: Some(deadline),
        }
    }

    pub fn with_timeout(&self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fails once the token was cancelled or its deadline has passed.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(DossierError::Cancelled);
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(DossierError::DeadlineExceeded);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_cancel_is_shared() {
        let token = CancelToken::new();
        let derived = token.with_timeout(Duration::from_secs(3600));

        assert!(derived.check().is_ok());
        token.cancel();
        assert_eq!(derived.check().unwrap_err().kind(), ErrorKind::Cancelled);
    }

    #[test]
    fn test_deadline() {
        let token = CancelToken::new().with_deadline(Instant::now());
        assert_eq!(token.check().unwrap_err().kind(), ErrorKind::DeadlineExceeded);

        // The earlier deadline wins.
        let later = token.with_timeout(Duration::from_secs(3600));
        assert_eq!(later.deadline(), token.deadline());
    }
}
