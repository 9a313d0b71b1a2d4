//! Contribution Snake - snake on a contribution-heatmap grid
//!
//! This library provides:
//! - Core game logic with no I/O (game module)
//! - A cancellable fixed-period tick source (timer module)
//! - Terminal rendering and key mapping (render, input modules)
//! - The interactive terminal session (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod timer;
