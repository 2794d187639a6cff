//! Time-based call coalescing.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::trace;

/// Collapses bursts of triggers into one delayed action.
///
/// Each [`trigger`](Self::trigger) cancels the pending timer and schedules a
/// new one `delay` in the future. When a timer elapses the action is spawned
/// as its own task, so superseding a timer never cancels an action that has
/// already started.
///
/// Must be used from within a tokio runtime.
pub struct Debouncer<F> {
    delay: Duration,
    action: F,
    pending: Option<JoinHandle<()>>,
}

impl<F, Fut> Debouncer<F>
where
    F: Fn() -> Fut + Clone + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    pub fn new(delay: Duration, action: F) -> Self {
        Self {
            delay,
            action,
            pending: None,
        }
    }

    /// Quiet window.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Restart the quiet window.
    pub fn trigger(&mut self) {
        if self.cancel() {
            trace!("pending trigger superseded");
        }

        let delay = self.delay;
        let action = self.action.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(action());
        }));
    }

    /// Drop the pending timer, if any. Returns whether one was still waiting.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    /// Whether a timer is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl<F> Drop for Debouncer<F> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::time::{advance, sleep, Instant};

    fn counting() -> (Arc<AtomicUsize>, impl Fn() -> futures::future::Ready<()> + Clone + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        (count, move || {
            c.fetch_add(1, Ordering::SeqCst);
            futures::future::ready(())
        })
    }

    /// Let spawned tasks run without moving the paused clock.
    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_trigger_fires_once_after_delay() {
        let (count, action) = counting();
        let mut debouncer = Debouncer::new(Duration::from_millis(150), action);

        debouncer.trigger();
        advance(Duration::from_millis(149)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        advance(Duration::from_millis(1)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_collapses_to_one_call_after_last_trigger() {
        let fired_at = Arc::new(std::sync::Mutex::new(Vec::new()));
        let f = fired_at.clone();
        let mut debouncer = Debouncer::new(Duration::from_millis(150), move || {
            f.lock().unwrap().push(Instant::now());
            futures::future::ready(())
        });

        let start = Instant::now();
        for _ in 0..10 {
            debouncer.trigger();
            advance(Duration::from_millis(100)).await;
            settle().await;
        }
        let last_trigger = start + Duration::from_millis(900);

        sleep(Duration::from_millis(500)).await;
        settle().await;

        let fired = fired_at.lock().unwrap();
        assert_eq!(fired.len(), 1);
        assert!(fired[0] >= last_trigger + Duration::from_millis(150));
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_quiet_windows_fire_separately() {
        let (count, action) = counting();
        let mut debouncer = Debouncer::new(Duration::from_millis(50), action);

        debouncer.trigger();
        sleep(Duration::from_millis(100)).await;
        settle().await;
        debouncer.trigger();
        sleep(Duration::from_millis(100)).await;
        settle().await;

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_and_drop_suppress_pending_call() {
        let (count, action) = counting();
        let mut debouncer = Debouncer::new(Duration::from_millis(50), action.clone());
        debouncer.trigger();
        assert!(debouncer.is_pending());
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());

        let mut dropped = Debouncer::new(Duration::from_millis(50), action);
        dropped.trigger();
        drop(dropped);

        sleep(Duration::from_millis(200)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retrigger_does_not_cancel_running_action() {
        let finished = Arc::new(AtomicUsize::new(0));
        let f = finished.clone();
        let mut debouncer = Debouncer::new(Duration::from_millis(10), move || {
            let f = f.clone();
            async move {
                sleep(Duration::from_millis(1000)).await;
                f.fetch_add(1, Ordering::SeqCst);
            }
        });

        debouncer.trigger();
        sleep(Duration::from_millis(20)).await;
        // The first action is now sleeping inside its own task.
        debouncer.trigger();
        sleep(Duration::from_millis(2000)).await;
        settle().await;

        assert_eq!(finished.load(Ordering::SeqCst), 2);
    }
}
