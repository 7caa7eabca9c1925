//! Refresh Scheduler
//!
//! One background task that emits a tick every period with the current clock
//! reading. The UI loop drains the ticks and decides what to redraw; the task
//! itself never touches the model.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};

/// Source of wall-clock time in fractional UNIX seconds
pub trait Clock: Send + Sync {
    fn now_secs(&self) -> f64;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> f64 {
        chrono::Utc::now().timestamp_millis() as f64 / 1000.0
    }
}

/// Clock that only moves when told to
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    millis: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn at(secs: f64) -> Self {
        let clock = Self::default();
        clock.set(secs);
        clock
    }

    pub fn set(&self, secs: f64) {
        self.millis.store((secs * 1000.0).round() as u64, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: f64) {
        self.millis
            .fetch_add((secs * 1000.0).round() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> f64 {
        self.millis.load(Ordering::SeqCst) as f64 / 1000.0
    }
}

/// One scheduler tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    pub now_secs: f64,
}

/// Owner of the single periodic task
#[derive(Debug, Default)]
pub struct RefreshScheduler {
    task: Option<JoinHandle<()>>,
}

impl RefreshScheduler {
    pub fn new() -> Self {
        Self { task: None }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Start ticking into `tx`; a no-op returning false if already running
    pub fn start(
        &mut self,
        clock: Arc<dyn Clock>,
        period: Duration,
        tx: mpsc::UnboundedSender<Tick>,
    ) -> bool {
        if self.is_running() {
            tracing::debug!("refresh scheduler already running");
            return false;
        }

        tracing::debug!(period_ms = period.as_millis() as u64, "starting refresh scheduler");
        self.task = Some(tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if tx.send(Tick { now_secs: clock.now_secs() }).is_err() {
                    // Receiver gone: the UI loop has shut down
                    break;
                }
            }
        }));
        true
    }

    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("refresh scheduler stopped");
        }
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::at(59.5);
        assert_eq!(clock.now_secs(), 59.5);
        clock.advance(0.5);
        assert_eq!(clock.now_secs(), 60.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_twice_is_noop() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = RefreshScheduler::new();
        let clock = Arc::new(ManualClock::at(100.0));

        assert!(scheduler.start(clock.clone(), Duration::from_millis(100), tx.clone()));
        assert!(!scheduler.start(clock, Duration::from_millis(100), tx));

        tokio::time::sleep(Duration::from_millis(350)).await;
        let mut ticks = 0;
        while rx.try_recv().is_ok() {
            ticks += 1;
        }
        // First tick fires immediately, then one per 100 ms: a second task would double this
        assert_eq!(ticks, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_ends_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = RefreshScheduler::new();
        scheduler.start(Arc::new(ManualClock::at(0.0)), Duration::from_millis(100), tx);

        tokio::time::sleep(Duration::from_millis(150)).await;
        scheduler.stop();
        assert!(!scheduler.is_running());
        while rx.try_recv().is_ok() {}

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(rx.try_recv().is_err());
    }
}
