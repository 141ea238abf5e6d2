//! # Delve Command Line Shell
//!
//! Builds a game from a seed (and optionally a JSON config), plays a scripted
//! key sequence through the turn engine, and prints the final frame.

use clap::Parser;
use delve::{parse_script, AsciiFrame, DelveResult, GameConfig, InputHandler, TurnEngine};
use log::{debug, info};
use std::path::PathBuf;

/// Command line arguments for the Delve shell.
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(about = "Turn-based dungeon crawl simulation, driven by a key script")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON configuration file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Map width in tiles
    #[arg(long)]
    width: Option<u32>,

    /// Map height in tiles
    #[arg(long)]
    height: Option<u32>,

    /// Number of room placement attempts
    #[arg(long)]
    max_rooms: Option<u32>,

    /// Sight radius in tiles
    #[arg(long)]
    fov_radius: Option<u32>,

    /// Do not reveal walls bordering the visible area
    #[arg(long)]
    no_light_walls: bool,

    /// Keys to play, e.g. "llkg<esc>"; named keys go in angle brackets
    #[arg(short, long, default_value = "")]
    keys: String,

    /// Number of message log lines to print
    #[arg(long, default_value_t = 5)]
    messages: usize,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> DelveResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level);
    info!("Starting Delve v{}", delve::VERSION);

    let config = build_config(&args)?;
    let mut engine = TurnEngine::new(config)?;

    let input_handler = InputHandler::new();
    for key in parse_script(&args.keys)? {
        let intent = input_handler.handle_key(key, engine.state());
        if intent.is_empty() {
            debug!("unmapped key {key:?} in state {}", engine.state());
            continue;
        }

        let outcome = engine.handle_intent(&intent)?;
        if outcome.toggle_fullscreen {
            info!("fullscreen toggle requested; the text shell has no window");
        }
        if outcome.quit {
            info!("player quit");
            break;
        }
    }

    print!("{}", AsciiFrame::capture(&engine, args.messages)?);
    Ok(())
}

/// Initializes `env_logger`, honouring `RUST_LOG` when set.
fn initialize_logging(log_level: &str) {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp_secs()
        .try_init();
}

/// Loads the config file if given, then applies command line overrides.
fn build_config(args: &Args) -> DelveResult<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load_from_json(path)?,
        None => GameConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.generation.seed = seed;
    }
    if let Some(width) = args.width {
        config.generation.width = width;
    }
    if let Some(height) = args.height {
        config.generation.height = height;
    }
    if let Some(max_rooms) = args.max_rooms {
        config.generation.max_rooms = max_rooms;
    }
    if let Some(radius) = args.fov_radius {
        config.fov.radius = radius;
    }
    if args.no_light_walls {
        config.fov.light_walls = false;
    }

    config.validate()?;
    Ok(config)
}
