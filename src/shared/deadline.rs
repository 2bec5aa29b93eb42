//! Deadlines for dependency calls.
//!
//! Every call into the database (and the readiness probe) runs under a
//! [`Deadline`] handed down by the caller, so a slow dependency fails the
//! request instead of parking it forever.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::{timeout_at, Instant};

/// Returned when the wrapped future did not finish before the deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("deadline exceeded")]
pub struct DeadlineExceeded;

/// A point in time by which a call must complete
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Deadline(Instant);

impl Deadline {
    /// Deadline `budget` from now
    pub fn after(budget: Duration) -> Self {
        Self(Instant::now() + budget)
    }

    /// Deadline at a fixed instant
    pub fn at(instant: Instant) -> Self {
        Self(instant)
    }

    /// The earlier of this deadline and `budget` from now
    pub fn tighten(self, budget: Duration) -> Self {
        self.min(Self::after(budget))
    }

    /// Drive `fut` to completion or give up at the deadline
    pub async fn run<F>(self, fut: F) -> Result<F::Output, DeadlineExceeded>
    where
        F: Future,
    {
        timeout_at(self.0, fut).await.map_err(|_| DeadlineExceeded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_completes_within_budget() {
        let deadline = Deadline::after(Duration::from_secs(5));
        let value = deadline.run(async { 42 }).await;
        assert_eq!(value, Ok(42));
    }

    #[tokio::test]
    async fn test_run_gives_up_after_deadline() {
        let deadline = Deadline::after(Duration::from_millis(10));
        let result = deadline
            .run(tokio::time::sleep(Duration::from_secs(5)))
            .await;
        assert_eq!(result, Err(DeadlineExceeded));
    }

    #[tokio::test]
    async fn test_tighten_never_extends() {
        let short = Deadline::after(Duration::from_millis(100));
        assert_eq!(short.tighten(Duration::from_secs(60)), short);

        let long = Deadline::after(Duration::from_secs(60));
        assert!(long.tighten(Duration::from_millis(100)) < long);
    }

    #[tokio::test]
    async fn test_expired_deadline_fails_pending_work() {
        let deadline = Deadline::at(Instant::now() - Duration::from_millis(1));
        let result = deadline.run(std::future::pending::<()>()).await;
        assert_eq!(result, Err(DeadlineExceeded));
    }
}
