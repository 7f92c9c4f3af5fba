use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use crate::game::Scheduler;

/// Tokio-backed [`Scheduler`]: await [`IntervalScheduler::next_tick`] and fire
/// the game loop each time it completes.
///
/// Must be used from within a tokio runtime.
#[derive(Debug, Default)]
pub struct IntervalScheduler {
    interval: Option<Interval>,
}

impl IntervalScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for the next timer fire; pends forever while no timer is installed
    pub async fn next_tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl Scheduler for IntervalScheduler {
    fn schedule(&mut self, period: Duration) {
        // First fire one full period after installation
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    fn cancel(&mut self) {
        self.interval = None;
    }

    fn is_scheduled(&self) -> bool {
        self.interval.is_some()
    }
}
