use anyhow::Result;
use clap::Parser;
use contrib_snake::game::GameConfig;
use contrib_snake::logging;
use contrib_snake::modes::HumanMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "contrib_snake")]
#[command(version, about = "Snake on a contribution heatmap")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Side length of the square grid
    #[arg(long)]
    grid_size: Option<usize>,

    /// Milliseconds between two moves
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for reproducible grids
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref())?;

    let config = cli.game_config()?;

    let mut human_mode = HumanMode::new(config)?;
    human_mode.run().await?;

    Ok(())
}
