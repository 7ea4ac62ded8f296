//! Self-updating 12-hour wall clock.
//!
//! The ticker runs as a background tokio task and publishes the latest
//! formatted time to whoever holds the [`ClockHandle`]; a slow reader skips
//! straight to the newest value. Dropping or stopping the handle ends the
//! task, so a longer-lived host can tear the clock down cleanly.

use std::time::Duration;

use chrono::{NaiveTime, Timelike};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Refresh period for the sign's clock.
pub const CLOCK_INTERVAL: Duration = Duration::from_secs(60);

/// Format a wall-clock time as `h:mm AM|PM`.
pub fn format_clock(hour: u32, minute: u32) -> String {
    let suffix = if hour >= 12 { "PM" } else { "AM" };
    let hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{hour}:{minute:02} {suffix}")
}

/// Format a [`NaiveTime`] with [`format_clock`].
pub fn format_time(time: NaiveTime) -> String {
    format_clock(time.hour(), time.minute())
}

/// Source of the current local wall-clock time.
pub trait TimeSource: Send + Sync + 'static {
    fn now(&self) -> NaiveTime;
}

/// Local system time via `chrono`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> NaiveTime {
        chrono::Local::now().time()
    }
}

/// Starts the recurring clock task.
pub struct ClockTicker;

impl ClockTicker {
    /// Tick immediately, then once per `interval`, until stopped.
    pub fn start<T: TimeSource>(time: T, interval: Duration) -> ClockHandle {
        let (tick_tx, tick_rx) = watch::channel(String::new());
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let text = format_time(time.now());
                        tracing::trace!(time = %text, "clock tick");
                        if tick_tx.send(text).is_err() {
                            break;
                        }
                    }
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            tracing::debug!("clock ticker stopped");
        });

        ClockHandle {
            ticks: tick_rx,
            stop: stop_tx,
            task,
        }
    }
}

/// Handle to a running clock ticker.
pub struct ClockHandle {
    ticks: watch::Receiver<String>,
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl ClockHandle {
    /// Wait for a time not yet seen and return the newest one. `None` once
    /// the ticker has ended.
    pub async fn next_tick(&mut self) -> Option<String> {
        self.ticks.changed().await.ok()?;
        Some(self.ticks.borrow_and_update().clone())
    }

    /// Stop the ticker and wait for its task to finish.
    pub async fn stop(self) {
        let _ = self.stop.send(true);
        let _ = self.task.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use tokio::time::timeout;

    struct FixedClock(NaiveTime);

    impl TimeSource for FixedClock {
        fn now(&self) -> NaiveTime {
            self.0
        }
    }

    /// Advances one minute per read.
    struct SteppingClock(Arc<AtomicU32>);

    impl TimeSource for SteppingClock {
        fn now(&self) -> NaiveTime {
            let minute = self.0.fetch_add(1, Ordering::SeqCst);
            NaiveTime::from_hms_opt(9, minute % 60, 0).unwrap()
        }
    }

    #[test]
    fn formats_midnight_as_twelve_am() {
        assert_eq!(format_clock(0, 5), "12:05 AM");
    }

    #[test]
    fn formats_afternoon_and_late_evening() {
        assert_eq!(format_clock(13, 0), "1:00 PM");
        assert_eq!(format_clock(23, 59), "11:59 PM");
    }

    #[test]
    fn formats_noon_and_morning() {
        assert_eq!(format_clock(12, 0), "12:00 PM");
        assert_eq!(format_clock(9, 7), "9:07 AM");
        assert_eq!(format_clock(11, 59), "11:59 AM");
    }

    #[test]
    fn format_time_uses_hour_and_minute_only() {
        let time = NaiveTime::from_hms_opt(0, 5, 42).unwrap();
        assert_eq!(format_time(time), "12:05 AM");
    }

    #[tokio::test]
    async fn ticks_immediately_on_start() {
        let time = NaiveTime::from_hms_opt(13, 0, 0).unwrap();
        let mut handle = ClockTicker::start(FixedClock(time), Duration::from_secs(3600));
        let first = timeout(Duration::from_secs(1), handle.next_tick())
            .await
            .expect("first tick should be immediate");
        assert_eq!(first.as_deref(), Some("1:00 PM"));
        handle.stop().await;
    }

    #[tokio::test]
    async fn keeps_ticking_on_interval() {
        let counter = Arc::new(AtomicU32::new(0));
        let mut handle =
            ClockTicker::start(SteppingClock(counter.clone()), Duration::from_millis(20));
        let mut seen = Vec::new();
        for _ in 0..3 {
            let tick = timeout(Duration::from_secs(2), handle.next_tick())
                .await
                .expect("tick within timeout");
            seen.push(tick.expect("ticker alive"));
        }
        assert_eq!(seen[0], "9:00 AM");
        assert!(seen.windows(2).all(|pair| pair[0] != pair[1]), "saw {seen:?}");
        handle.stop().await;
    }

    #[tokio::test]
    async fn slow_reader_gets_the_newest_time() {
        let counter = Arc::new(AtomicU32::new(0));
        let mut handle =
            ClockTicker::start(SteppingClock(counter.clone()), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(80)).await;
        let tick = timeout(Duration::from_secs(2), handle.next_tick())
            .await
            .expect("tick within timeout")
            .expect("ticker alive");
        assert_ne!(tick, "9:00 AM");
        handle.stop().await;
    }

    #[tokio::test]
    async fn stop_ends_the_task() {
        let counter = Arc::new(AtomicU32::new(0));
        let handle = ClockTicker::start(SteppingClock(counter.clone()), Duration::from_millis(5));
        timeout(Duration::from_secs(2), handle.stop())
            .await
            .expect("stop should complete");
        let reads = counter.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(counter.load(Ordering::SeqCst), reads);
    }
}
