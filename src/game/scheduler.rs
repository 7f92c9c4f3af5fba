use std::time::Duration;

/// Periodic timer that drives a [`GameLoop`](super::GameLoop).
///
/// The scheduler only tracks whether a timer is installed and at what period;
/// whoever owns the timer calls [`GameLoop::fire`](super::GameLoop::fire) each
/// time it elapses. Fires must be strictly serial.
pub trait Scheduler {
    /// Install a periodic timer, replacing any timer already installed
    fn schedule(&mut self, period: Duration);

    /// Tear down the installed timer; no-op when none is installed
    fn cancel(&mut self);

    fn is_scheduled(&self) -> bool;
}

/// Scheduler without a clock, for headless play and tests.
///
/// Records what was installed; the caller fires the loop by hand.
#[derive(Debug, Default, Clone)]
pub struct ManualScheduler {
    period: Option<Duration>,
    installs: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Period of the installed timer
    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// How many timers have been installed over the scheduler's lifetime
    pub fn installs(&self) -> usize {
        self.installs
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, period: Duration) {
        self.period = Some(period);
        self.installs += 1;
    }

    fn cancel(&mut self) {
        self.period = None;
    }

    fn is_scheduled(&self) -> bool {
        self.period.is_some()
    }
}
