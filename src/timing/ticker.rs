use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Recurring tick source with a mutable period
///
/// While stopped, [`TickScheduler::tick`] never completes, so it can sit in
/// a `select!` loop unconditionally.
pub struct TickScheduler {
    period: Duration,
    interval: Option<Interval>,
}

impl TickScheduler {
    /// Create a stopped scheduler
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    /// Start ticking; the first tick fires one period from now
    pub fn start(&mut self) {
        self.interval = Some(Self::make_interval(self.period));
    }

    /// Stop ticking until the next `start`
    pub fn stop(&mut self) {
        self.interval = None;
    }

    /// Cancel the pending tick and tick at the new period from now on
    ///
    /// A stopped scheduler only records the period.
    pub fn reschedule(&mut self, period: Duration) {
        self.period = period;
        if self.interval.is_some() {
            self.interval = Some(Self::make_interval(period));
        }
    }

    /// Wait for the next tick
    pub async fn tick(&mut self) -> Instant {
        match self.interval.as_mut() {
            Some(interval) => interval.tick().await,
            None => std::future::pending().await,
        }
    }

    fn make_interval(period: Duration) -> Interval {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    fn assert_elapsed(since: Instant, expected: Duration) {
        let elapsed = since.elapsed();
        assert!(
            elapsed >= expected && elapsed < expected + Duration::from_millis(5),
            "elapsed {elapsed:?}, expected {expected:?}"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_after_one_period() {
        let mut ticker = TickScheduler::new(Duration::from_millis(200));
        let started = Instant::now();
        ticker.start();

        ticker.tick().await;
        assert_elapsed(started, Duration::from_millis(200));

        ticker.tick().await;
        assert_elapsed(started, Duration::from_millis(400));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_scheduler_never_ticks() {
        let mut ticker = TickScheduler::new(Duration::from_millis(10));
        assert!(!ticker.is_running());
        assert!(timeout(Duration::from_secs(5), ticker.tick()).await.is_err());

        ticker.start();
        ticker.tick().await;
        ticker.stop();
        assert!(timeout(Duration::from_secs(5), ticker.tick()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_uses_new_period() {
        let mut ticker = TickScheduler::new(Duration::from_millis(200));
        ticker.start();
        ticker.tick().await;

        let changed = Instant::now();
        ticker.reschedule(Duration::from_millis(195));
        assert_eq!(ticker.period(), Duration::from_millis(195));

        ticker.tick().await;
        assert_elapsed(changed, Duration::from_millis(195));
        ticker.tick().await;
        assert_elapsed(changed, Duration::from_millis(390));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_does_not_double_fire() {
        let mut ticker = TickScheduler::new(Duration::from_millis(100));
        ticker.start();
        tokio::time::advance(Duration::from_millis(90)).await;

        // The tick due in 10ms is cancelled, not delivered early
        let changed = Instant::now();
        ticker.reschedule(Duration::from_millis(50));
        ticker.tick().await;
        assert_elapsed(changed, Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_while_stopped_keeps_it_stopped() {
        let mut ticker = TickScheduler::new(Duration::from_millis(100));
        ticker.reschedule(Duration::from_millis(80));

        assert!(!ticker.is_running());
        assert_eq!(ticker.period(), Duration::from_millis(80));

        let started = Instant::now();
        ticker.start();
        ticker.tick().await;
        assert_elapsed(started, Duration::from_millis(80));
    }
}
