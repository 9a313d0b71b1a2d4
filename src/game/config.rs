use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest grid the game accepts
pub const MAX_GRID_SIZE: usize = 256;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square grid
    pub grid_size: usize,
    /// Milliseconds between two ticks
    pub tick_interval_ms: u64,
    /// Seed for grid generation; entropy when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            tick_interval_ms: 200,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Same configuration with a fixed seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load a configuration from a JSON file
    ///
    /// Fields missing from the file keep their default values.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        ensure!(self.grid_size > 0, "grid_size must be positive");
        ensure!(
            self.grid_size <= MAX_GRID_SIZE,
            "grid_size {} exceeds the maximum of {}",
            self.grid_size,
            MAX_GRID_SIZE
        );
        ensure!(self.tick_interval_ms > 0, "tick_interval_ms must be positive");
        Ok(())
    }

    /// Cell the snake starts on after every reset
    pub fn start_position(&self) -> (i32, i32) {
        let center = (self.grid_size / 2) as i32;
        (center, center)
    }
}
