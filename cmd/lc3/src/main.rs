//! LC3 CLI - encode and decode raw audio through persistent LC3 sessions.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{DecodeCommand, EncodeCommand, InfoCommand, RoundtripCommand};

/// LC3 CLI - encode and decode raw audio with liblc3.
///
/// PCM files are raw 16-bit little-endian mono at the configured sample
/// rate. LC3 files are concatenated fixed-size frames with no container.
///
/// The default configuration is 10ms frames at 16kHz with 20 byte frames
/// (16kbps). Override it with a YAML or JSON file:
///
///   frame_duration_us: 10000
///   sample_rate_hz: 16000
///   frame_bytes: 40
#[derive(Parser)]
#[command(name = "lc3")]
#[command(about = "LC3 transcoding CLI tool")]
#[command(version)]
pub struct Cli {
    /// Codec config file (YAML or JSON)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Output as JSON (for piping)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show codec configuration and frame geometry
    Info(InfoCommand),
    /// Encode raw PCM to LC3 frames
    Encode(EncodeCommand),
    /// Decode LC3 frames to raw PCM
    Decode(DecodeCommand),
    /// Encode then decode through one pair of sessions
    Roundtrip(RoundtripCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays usable for audio.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Info(cmd) => cmd.run(&cli),
        Commands::Encode(cmd) => cmd.run(&cli),
        Commands::Decode(cmd) => cmd.run(&cli),
        Commands::Roundtrip(cmd) => cmd.run(&cli),
    }
}
