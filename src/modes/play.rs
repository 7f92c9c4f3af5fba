use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::cell::Cell;
use std::io::{Stderr, stderr};
use std::rc::Rc;
use std::time::Duration;
use tokio::time::interval;
use tracing::info;

use super::IntervalScheduler;
use crate::game::{GameConfig, GameLoop, GameStatus, SessionRng};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Interactive terminal game: the keyboard steers the player snake against the AI
pub struct PlayMode {
    game_loop: GameLoop<IntervalScheduler>,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    /// Set by the tick callback, cleared once the frame is drawn
    redraw: Rc<Cell<bool>>,
    result_recorded: bool,
    should_quit: bool,
}

impl PlayMode {
    /// Must be called from within a tokio runtime
    pub fn new(config: GameConfig, seed: Option<u64>) -> Self {
        let rng = seed.map(SessionRng::new).unwrap_or_else(SessionRng::from_entropy);
        info!(seed = rng.seed(), "session rng ready");

        let redraw = Rc::new(Cell::new(false));
        let flag = Rc::clone(&redraw);
        let game_loop = GameLoop::init(
            config,
            rng,
            IntervalScheduler::new(),
            Some(Box::new(move || flag.set(true))),
        );

        Self {
            game_loop,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            redraw,
            result_recorded: false,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;
        self.game_loop.stop();

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Game logic tick, paced by the difficulty interval
                _ = self.game_loop.scheduler_mut().next_tick() => {
                    self.on_timer();
                    if self.redraw.replace(false) {
                        self.draw(terminal)?;
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.refresh_clock();
                    self.draw(terminal)?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn draw(&self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        terminal
            .draw(|frame| {
                self.renderer
                    .render(frame, self.game_loop.session(), &self.metrics);
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    /// Only running time counts towards the match clock
    fn refresh_clock(&mut self) {
        self.metrics
            .update(self.game_loop.status() == GameStatus::Running);
    }

    fn on_timer(&mut self) {
        if self.game_loop.fire().is_none() {
            return;
        }

        if self.game_loop.is_over() && !self.result_recorded {
            if let Some(winner) = self.game_loop.winner() {
                self.metrics
                    .on_game_over(winner, self.game_loop.player_score());
            }
            self.result_recorded = true;
        }
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            let config = self.game_loop.session().config();

            match self.input_handler.handle_key_event(key) {
                KeyAction::Steer(direction) => {
                    self.game_loop.set_player_direction(direction);
                }
                KeyAction::TogglePause => self.game_loop.toggle_pause(),
                KeyAction::Restart => self.restart(None),
                KeyAction::SetDifficulty(difficulty) => self.restart(Some(GameConfig {
                    difficulty,
                    ..config
                })),
                KeyAction::CycleAiLevel => self.restart(Some(GameConfig {
                    ai_level: config.ai_level.next(),
                    ..config
                })),
                KeyAction::CycleMapSize => self.restart(Some(GameConfig {
                    map_size: config.map_size.next(),
                    ..config
                })),
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    fn restart(&mut self, config: Option<GameConfig>) {
        self.game_loop.restart(config);
        self.metrics.on_game_start();
        self.result_recorded = false;
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
