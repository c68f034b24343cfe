use anyhow::Result;
use clap::Parser;
use learning_engine::learning::{default_store_path, store_file_name};
use learning_engine::{Engine, EngineConfig};
use shakmaty::Color;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use xfchess_trainer::cli::Args;
use xfchess_trainer::SelfPlay;

fn store_path(args: &Args, side: Color) -> PathBuf {
    let path = match &args.store_dir {
        Some(dir) => dir.join(store_file_name(side)),
        None => default_store_path(side),
    };
    if args.compress {
        let mut name = path.into_os_string();
        name.push(".zst");
        PathBuf::from(name)
    } else {
        path
    }
}

fn open_engine(args: &Args, side: Color, config: EngineConfig) -> Result<Engine> {
    Ok(Engine::open(side, config, store_path(args, side))?)
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    let config = args.engine_config();
    let white = open_engine(&args, Color::White, config.clone())?;
    let black = open_engine(&args, Color::Black, Args::black_config(&config))?;

    info!(
        "[TRAINER] Starting {} games at depth {} (max {} plies)",
        args.games, config.search.depth, args.max_plies
    );

    let mut session = SelfPlay::new(white, black, args.max_plies);
    let outcome = session.run(args.games, args.report_every);

    match &outcome {
        Ok(tally) => {
            info!("[TRAINER] ========== TRAINING COMPLETE ==========");
            info!("[TRAINER] {}", tally);
        }
        Err(e) => error!("[TRAINER] Training stopped: {:#}", e),
    }
    info!("[TRAINER] {}", session.white().stats());
    info!("[TRAINER] {}", session.black().stats());

    // stores are saved even when a game failed
    session.shutdown()?;
    outcome.map(|_| ())
}
