//! Debounced execution for field-change handlers.
//!
//! Reference checks fire on every keystroke in the id fields; debouncing
//! bounds the request rate (it is not needed for correctness - each cache
//! key is independently last-response-wins).

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tokio::task::AbortHandle;

/// Runs at most the latest of a series of scheduled futures.
///
/// Each call to [`Debouncer::schedule`] cancels the previously scheduled
/// future (if it has not started yet) and arms a new one that runs after
/// the fixed delay.
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<AbortHandle>>,
}

impl Debouncer {
    /// Delay used by the form id fields, matching the original UI's 300ms.
    pub const FIELD_DELAY: Duration = Duration::from_millis(300);

    /// Create a debouncer with a fixed delay.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Schedule `future` to run after the delay, superseding any prior
    /// schedule that has not fired yet.
    pub fn schedule<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            future.await;
        })
        .abort_handle();

        let previous = {
            let mut pending = self.pending.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
            pending.replace(handle)
        };
        if let Some(previous) = previous {
            previous.abort();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_only_latest_schedule_runs() {
        let debouncer = Debouncer::new(Duration::from_millis(50));
        let hits = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(AtomicUsize::new(0));

        for value in 1..=5 {
            let hits = Arc::clone(&hits);
            let last = Arc::clone(&last);
            debouncer.schedule(async move {
                hits.fetch_add(1, Ordering::SeqCst);
                last.store(value, Ordering::SeqCst);
            });
        }

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(last.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_spaced_schedules_all_run() {
        let debouncer = Debouncer::new(Duration::from_millis(10));
        let hits = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let hits = Arc::clone(&hits);
            debouncer.schedule(async move {
                hits.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }
}
