//! Snake Duel - a human snake against a heuristic AI snake on a shared grid
//!
//! This library provides:
//! - Core game logic (game module)
//! - TUI rendering (render module)
//! - Keyboard input mapping (input module)
//! - Per-run match statistics (metrics module)
//! - The interactive terminal mode (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
