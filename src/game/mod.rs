//! Core game logic for the player-versus-AI duel
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Sessions are driven tick by tick, either by hand or through a [`GameLoop`] and a
//! [`Scheduler`].

pub mod ai;
pub mod config;
pub mod direction;
pub mod engine;
pub mod food;
pub mod game_loop;
pub mod grid;
pub mod rng;
pub mod scheduler;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use ai::{AiDecision, DecisionKind};
pub use config::{AiLevel, ConfigError, Difficulty, GameConfig, MapSize};
pub use direction::Direction;
pub use engine::CollisionReport;
pub use game_loop::{GameLoop, TickCallback};
pub use grid::Grid;
pub use rng::{RandomSource, SessionRng};
pub use scheduler::{ManualScheduler, Scheduler};
pub use session::{GameSession, TickReport};
pub use state::{CollisionType, Food, GameStatus, Position, Rgb, Snake, Winner};
