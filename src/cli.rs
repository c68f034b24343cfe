//! Command line arguments

use clap::Parser;
use learning_engine::{default_config_path, EngineConfig};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "xfchess-trainer",
    version,
    about = "Train the XFChess learning engine by self-play"
)]
pub struct Args {
    /// Number of games to play
    #[arg(short = 'n', long, default_value_t = 10)]
    pub games: u64,

    /// Search depth, overrides the config file
    #[arg(short, long)]
    pub depth: Option<u32>,

    /// Plies before an unfinished game is adjudicated on material
    #[arg(long, default_value_t = 150)]
    pub max_plies: u32,

    /// Engine config file (JSON); defaults to the user config directory
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory holding the learning stores; defaults to the user data directory
    #[arg(long)]
    pub store_dir: Option<PathBuf>,

    /// Write zstd-compressed stores
    #[arg(long)]
    pub compress: bool,

    /// Seed for reproducible exploration
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log progress statistics every N games
    #[arg(long, default_value_t = 10)]
    pub report_every: u64,

    /// Play without exploring, updating or saving the stores
    #[arg(long)]
    pub no_learning: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Engine configuration with command line overrides applied
    pub fn engine_config(&self) -> EngineConfig {
        let path = self.config.clone().unwrap_or_else(default_config_path);
        let mut config = EngineConfig::load(&path);

        if let Some(depth) = self.depth {
            config.search.depth = depth;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if self.no_learning {
            config.learning.enabled = false;
        }
        config
    }

    /// Config for the black engine: same settings, different RNG stream
    pub fn black_config(config: &EngineConfig) -> EngineConfig {
        let mut black = config.clone();
        black.seed = config.seed.map(|seed| seed.wrapping_add(1));
        black
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["xfchess-trainer"]);
        assert_eq!(args.games, 10);
        assert_eq!(args.max_plies, 150);
        assert_eq!(args.report_every, 10);
        assert!(!args.no_learning);
    }

    #[test]
    fn test_overrides_apply_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("engine.json");
        let args = Args::parse_from([
            "xfchess-trainer",
            "--config",
            config_path.to_str().unwrap(),
            "--depth",
            "2",
            "--seed",
            "9",
            "--no-learning",
        ]);

        let config = args.engine_config();
        assert_eq!(config.search.depth, 2);
        assert_eq!(config.seed, Some(9));
        assert!(!config.learning.enabled);
        assert_eq!(Args::black_config(&config).seed, Some(10));
    }
}
