use super::config::GameConfig;
use super::direction::Direction;
use super::rng::{RandomSource, SessionRng};
use super::scheduler::Scheduler;
use super::session::{GameSession, TickReport};
use super::state::{GameStatus, Winner};
use tracing::debug;

/// Callback invoked after every executed tick
pub type TickCallback = Box<dyn FnMut()>;

/// Timer-driven front door to a [`GameSession`].
///
/// Owns the session, the scheduler handle and the tick callback. The driver
/// calls [`GameLoop::fire`] each time the scheduled timer elapses; the tick body
/// only runs while the game is running.
pub struct GameLoop<S: Scheduler, R: RandomSource = SessionRng> {
    session: GameSession<R>,
    scheduler: S,
    on_tick: Option<TickCallback>,
}

impl<S: Scheduler, R: RandomSource> GameLoop<S, R> {
    /// Create a running game and install its timer
    pub fn init(
        config: GameConfig,
        rng: R,
        mut scheduler: S,
        on_tick: Option<TickCallback>,
    ) -> Self {
        scheduler.schedule(config.tick_interval());
        Self {
            session: GameSession::new(config, rng),
            scheduler,
            on_tick,
        }
    }

    /// Handle one timer fire. Returns the report when a tick actually ran.
    pub fn fire(&mut self) -> Option<TickReport> {
        if !self.scheduler.is_scheduled() {
            return None;
        }

        let report = self.session.tick()?;
        if let Some(on_tick) = self.on_tick.as_mut() {
            on_tick();
        }
        Some(report)
    }

    pub fn set_player_direction(&mut self, direction: Direction) -> bool {
        self.session.set_player_direction(direction)
    }

    pub fn pause(&mut self) {
        self.session.pause();
    }

    pub fn resume(&mut self) {
        self.session.resume();
    }

    pub fn toggle_pause(&mut self) {
        self.session.toggle_pause();
    }

    /// Reset the game and replace the timer, picking up a new tick interval
    /// when the configuration changes
    pub fn restart(&mut self, config: Option<GameConfig>) {
        self.scheduler.cancel();
        self.session.restart(config);
        self.scheduler.schedule(self.session.config().tick_interval());
    }

    /// Install the timer if none is installed
    pub fn start(&mut self) {
        if !self.scheduler.is_scheduled() {
            self.scheduler.schedule(self.session.config().tick_interval());
            debug!("game loop started");
        }
    }

    /// Tear down the timer. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if self.scheduler.is_scheduled() {
            self.scheduler.cancel();
            debug!("game loop stopped");
        }
    }

    pub fn is_active(&self) -> bool {
        self.scheduler.is_scheduled()
    }

    pub fn player_score(&self) -> u32 {
        self.session.player_score()
    }

    pub fn ai_score(&self) -> u32 {
        self.session.ai_score()
    }

    pub fn is_over(&self) -> bool {
        self.session.is_over()
    }

    pub fn winner(&self) -> Option<Winner> {
        self.session.winner()
    }

    pub fn status(&self) -> GameStatus {
        self.session.status()
    }

    pub fn result_description(&self) -> &'static str {
        self.session.result_description()
    }

    pub fn session(&self) -> &GameSession<R> {
        &self.session
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}
