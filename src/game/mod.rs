//! Core game logic for contribution snake
//!
//! This module holds every rule of the game without any I/O or rendering
//! dependencies, so any front end can drive it.

pub mod action;
pub mod config;
pub mod engine;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::GameConfig;
pub use engine::{GameEngine, TickOutcome};
pub use grid::{CONTRIBUTION_LEVELS, Grid};
pub use state::{GamePhase, GameState, Position, Snake};
