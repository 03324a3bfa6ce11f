use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use stage_lighting_core::{
    load_instructions, AppConfig, BroadcastLoop, DeviceAdapter, FixtureInventory,
    PlaybackEngine, PlaybackEvent, PresentationAdapter, SharedEngine, SystemClock,
};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> stage_lighting_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = match cli.config.as_deref() {
        Some(path) => AppConfig::from_path(path)?,
        None => AppConfig::live_defaults(),
    };

    match cli.command {
        Commands::Play {
            instructions,
            frames,
            start_at,
        } => run_play(&instructions, &config, frames, start_at).await,
        Commands::Cues {
            instructions,
            fixtures,
        } => run_cues(&instructions, fixtures.or(config.venue.fixtures_path)),
        Commands::Status { instructions } => run_status(&instructions, &config),
    }
}

async fn run_play(
    instructions: &Path,
    config: &AppConfig,
    frames: Option<u64>,
    start_at: Option<f64>,
) -> stage_lighting_core::Result<()> {
    tracing::info!(?instructions, "starting playback");

    let mut engine = PlaybackEngine::with_config(SystemClock::new(), &config.playback);
    engine.load(load_instructions(instructions)?)?;
    let engine = SharedEngine::new(engine);
    let mut events = engine.subscribe()?;

    engine.play()?;
    if let Some(time) = start_at {
        engine.seek(time)?;
    }

    let broadcast = BroadcastLoop::spawn(engine.clone(), PresentationAdapter::new(), &config.broadcast);
    let mut observer = broadcast.subscribe();
    let mut emitted = 0u64;

    loop {
        tokio::select! {
            frame = observer.recv() => match frame {
                Ok(frame) => {
                    println!("{}", serde_json::to_string(&frame)?);
                    emitted += 1;
                    if frames.is_some_and(|limit| emitted >= limit) {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "stdout observer lagged behind");
                }
                Err(RecvError::Closed) => break,
            },
            event = events.recv() => match event {
                Ok(PlaybackEvent::Complete { total_duration }) => {
                    tracing::info!(total_duration, "show complete");
                    break;
                }
                Ok(event) => tracing::debug!(?event, "playback event"),
                Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted, stopping playback");
                engine.stop()?;
                break;
            }
        }
    }

    broadcast.shutdown().await
}

fn run_cues(instructions: &Path, fixtures: Option<PathBuf>) -> stage_lighting_core::Result<()> {
    tracing::info!(?instructions, ?fixtures, "converting instructions to fixture cues");

    let inventory = match fixtures {
        Some(path) => FixtureInventory::load(path)?,
        None => {
            tracing::warn!("no fixture inventory configured, cue sheets will be empty");
            FixtureInventory::default()
        }
    };

    let adapter = DeviceAdapter::new(inventory);
    let sheets = adapter.convert_all(&load_instructions(instructions)?);
    println!("{}", serde_json::to_string_pretty(&sheets)?);
    Ok(())
}

fn run_status(instructions: &Path, config: &AppConfig) -> stage_lighting_core::Result<()> {
    let mut engine = PlaybackEngine::with_config(SystemClock::new(), &config.playback);
    engine.load(load_instructions(instructions)?)?;

    println!(
        "{} instructions, {:.2}s total",
        engine.instructions().len(),
        engine.total_duration()
    );
    for instruction in engine.instructions() {
        println!("{instruction}");
        for group in &instruction.groups {
            println!("  {group}");
        }
    }
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Scripted theatrical lighting playback", long_about = None)]
struct Cli {
    /// Optional JSON configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play an instruction file and stream frames to stdout as JSON lines.
    Play {
        /// Path to the JSON instruction list.
        instructions: PathBuf,
        /// Stop after this many frames.
        #[arg(short, long)]
        frames: Option<u64>,
        /// Seek to this time (seconds) right after starting.
        #[arg(long)]
        start_at: Option<f64>,
    },
    /// Expand instructions into fixture-level channel values.
    Cues {
        /// Path to the JSON instruction list.
        instructions: PathBuf,
        /// Fixture inventory; defaults to the configured venue inventory.
        #[arg(short, long)]
        fixtures: Option<PathBuf>,
    },
    /// Print show length and a one-line summary per instruction and group.
    Status {
        /// Path to the JSON instruction list.
        instructions: PathBuf,
    },
}
