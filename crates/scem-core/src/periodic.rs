// ── Periodic background work ──
//
// Clock refresh, chart regeneration and the demo alarm generator all run
// as a `PeriodicTask`. The callback never touches view state directly;
// callers hand it a channel sender and react to what it sends.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// A cancellable timer that invokes a callback every `period`.
///
/// The first call happens one full period after [`start`](Self::start).
/// Dropping the task stops it.
#[derive(Debug, Default)]
pub struct PeriodicTask {
    name: &'static str,
    cancel: Option<CancellationToken>,
    handle: Option<JoinHandle<()>>,
}

impl PeriodicTask {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            cancel: None,
            handle: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Start ticking. A running task is stopped and restarted with the
    /// new period and callback. Must be called inside a tokio runtime.
    pub fn start<F>(&mut self, period: Duration, mut on_tick: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.stop();
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let name = self.name;

        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            interval.tick().await; // consume the immediate first tick

            loop {
                tokio::select! {
                    biased;
                    () = token.cancelled() => break,
                    _ = interval.tick() => on_tick(),
                }
            }
            debug!(task = name, "periodic task stopped");
        }));
        self.cancel = Some(cancel);
        debug!(task = name, ?period, "periodic task started");
    }

    /// Stop ticking. No-op when not running.
    pub fn stop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel.cancel();
        }
        self.handle = None;
    }

    pub fn is_running(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|c| !c.is_cancelled())
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl FnMut() + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        (count, move || {
            c.fetch_add(1, Ordering::SeqCst);
        })
    }

    async fn advance(d: Duration) {
        tokio::time::advance(d).await;
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period_after_start() {
        let (count, f) = counter();
        let mut task = PeriodicTask::new("test");
        task.start(Duration::from_secs(5), f);
        tokio::task::yield_now().await;

        advance(Duration::from_secs(4)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        advance(Duration::from_secs(1)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        advance(Duration::from_secs(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert!(task.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_halts_ticks() {
        let (count, f) = counter();
        let mut task = PeriodicTask::new("test");
        task.start(Duration::from_secs(1), f);
        tokio::task::yield_now().await;
        advance(Duration::from_secs(1)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        task.stop();
        assert!(!task.is_running());
        advance(Duration::from_secs(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        // stopping twice is harmless
        task.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels() {
        let (count, f) = counter();
        {
            let mut task = PeriodicTask::new("test");
            task.start(Duration::from_secs(1), f);
            tokio::task::yield_now().await;
        }
        advance(Duration::from_secs(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
