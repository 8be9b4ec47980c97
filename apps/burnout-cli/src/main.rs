use anyhow::Context;
use burnout_controller::{GameConfig, GameController};
use burnout_input::{KeyCode, KeyEvent, MoveOutcome, ScriptedInput};
use burnout_render::DebugTextRenderer;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "burnout-cli", about = "CLI tool for burnout layouts")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version and crate info
    Info,
    /// Load a layout and report what it sets up
    Check {
        /// Layout file (.yaml, .yml or .json)
        layout: PathBuf,
    },
    /// Replay a key-code script against a layout
    Play {
        /// Layout file (.yaml, .yml or .json)
        layout: PathBuf,
        /// Comma-separated key codes or names, e.g. `40,40,right,ArrowUp`
        #[arg(short, long, value_delimiter = ',')]
        keys: Vec<KeyCode>,
        /// Print the view after every accepted move
        #[arg(long)]
        frames: bool,
    },
}

fn load(layout: &Path) -> anyhow::Result<GameConfig> {
    GameConfig::from_path(layout).with_context(|| format!("loading {}", layout.display()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("burnout-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", burnout_common::crate_info());
            println!("kernel: {}", burnout_kernel::crate_info());
            println!("render: {}", burnout_render::crate_info());
            println!("input: {}", burnout_input::crate_info());
            println!("controller: {}", burnout_controller::crate_info());
        }
        Commands::Check { layout } => {
            let config = load(&layout)?;
            let block_count = config.blocks.len();
            let game = GameController::from_config(config, DebugTextRenderer::new())
                .context("invalid layout")?;
            println!("Layout: {}", layout.display());
            println!(
                "Blocks: {}, obstacles: {}",
                block_count,
                game.obstacles().len()
            );
            println!("Avatar: {}", game.state().position());
            println!(
                "Controls: {}",
                if game.is_controlled() {
                    "keyboard"
                } else {
                    "none (inert)"
                }
            );
            print!("{}", game.renderer().frame());
        }
        Commands::Play {
            layout,
            keys,
            frames,
        } => {
            let config = load(&layout)?;
            let start = config.avatar.position;
            let mut game = GameController::from_config(config, DebugTextRenderer::new())
                .context("invalid layout")?;
            if !game.is_controlled() {
                println!("Layout has no keyboard controls; nothing to play.");
                return Ok(());
            }
            print!("{}", game.renderer().frame());
            tracing::debug!(keys = keys.len(), frames, "replaying key script");

            if frames {
                for code in keys {
                    match game.handle_key(KeyEvent::new(code)) {
                        MoveOutcome::Moved(event) => {
                            println!("key {code}: moved {} to {}", event.direction, event.to);
                            print!("{}", game.renderer().frame());
                        }
                        MoveOutcome::Blocked { direction, .. } => {
                            println!("key {code}: {direction} blocked")
                        }
                        MoveOutcome::OutOfBounds { direction, .. } => {
                            println!("key {code}: {direction} leaves the map")
                        }
                        MoveOutcome::Overflow { direction } => {
                            println!("key {code}: {direction} overflows the grid")
                        }
                        MoveOutcome::Ignored => println!("key {code}: ignored"),
                    }
                }
            } else {
                let summary = game.run(&mut ScriptedInput::new(keys));
                println!(
                    "Keys: {} (moved={}, blocked={}, out_of_bounds={}, overflowed={}, ignored={})",
                    summary.total(),
                    summary.moved,
                    summary.blocked,
                    summary.out_of_bounds,
                    summary.overflowed,
                    summary.ignored
                );
                print!("{}", game.renderer().frame());
            }

            let state = game.state();
            let replayed = burnout_kernel::EntityState::replay(start, state.history());
            println!(
                "Final: avatar={}, offset=({}, {}), hash={:#x}, replay={}",
                state.position(),
                state.camera_offset().x,
                state.camera_offset().y,
                state.state_hash(),
                if replayed.state_hash() == state.state_hash() {
                    "OK"
                } else {
                    "MISMATCH"
                }
            );
        }
    }

    Ok(())
}
