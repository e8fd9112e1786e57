//! Encode, decode and roundtrip commands.

use clap::Args;
use giztoy_lc3::{Config, DecoderSession, EncoderSession, Lc3Backend, StreamEncoder};
use tracing::debug;

use super::{get_config, output_bytes, print_stats, print_success, read_input};
use crate::Cli;

/// Encode raw s16le mono PCM to LC3 frames.
#[derive(Args)]
pub struct EncodeCommand {
    /// Input PCM file
    #[arg(short = 'i', long)]
    input: String,
    /// Output LC3 file
    #[arg(short = 'o', long)]
    output: String,
    /// Feed the encoder in chunks of this many bytes
    #[arg(long)]
    chunk: Option<usize>,
}

impl EncodeCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let config = get_config(cli)?;
        let pcm = read_input(&self.input)?;
        let mut session = EncoderSession::open(&Lc3Backend, &config)?;

        let (frames, stats) = match self.chunk {
            Some(0) => anyhow::bail!("--chunk must be greater than zero"),
            Some(chunk) => {
                let mut stream = StreamEncoder::new(session);
                let mut frames = Vec::with_capacity(config.geometry().encoded_len(pcm.len()));
                for part in pcm.chunks(chunk) {
                    frames.extend(stream.push(part));
                }
                debug!(pending = stream.pending(), "trailing pcm dropped");
                (frames, stream.session().stats())
            }
            None => {
                let frames = session.encode(&pcm);
                (frames, session.stats())
            }
        };

        output_bytes(&frames, &self.output)?;
        print_success(&format!(
            "Encoded {} bytes PCM to {} bytes LC3 ({} frames)",
            pcm.len(),
            frames.len(),
            stats.frames
        ));
        print_stats("encoder", &stats);
        Ok(())
    }
}

/// Decode LC3 frames to raw s16le mono PCM.
#[derive(Args)]
pub struct DecodeCommand {
    /// Input LC3 file
    #[arg(short = 'i', long)]
    input: String,
    /// Output PCM file
    #[arg(short = 'o', long)]
    output: String,
}

impl DecodeCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let config = get_config(cli)?;
        let data = read_input(&self.input)?;
        let mut session = DecoderSession::open(&Lc3Backend, &config)?;

        let pcm = session.decode(&data);
        output_bytes(&pcm, &self.output)?;
        print_success(&format!(
            "Decoded {} bytes LC3 to {} bytes PCM",
            data.len(),
            pcm.len()
        ));
        print_stats("decoder", &session.stats());
        Ok(())
    }
}

/// Encode then decode through one pair of sessions.
#[derive(Args)]
pub struct RoundtripCommand {
    /// Input PCM file
    #[arg(short = 'i', long)]
    input: String,
    /// Output PCM file
    #[arg(short = 'o', long)]
    output: String,
}

impl RoundtripCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let config = get_config(cli)?;
        let pcm = read_input(&self.input)?;
        let out = roundtrip(&config, &pcm)?;

        output_bytes(&out, &self.output)?;
        print_success(&format!(
            "Roundtrip {} bytes PCM at {}bps",
            out.len(),
            config.bitrate_bps()
        ));
        Ok(())
    }
}

fn roundtrip(config: &Config, pcm: &[u8]) -> anyhow::Result<Vec<u8>> {
    let mut encoder = EncoderSession::open(&Lc3Backend, config)?;
    let mut decoder = DecoderSession::open(&Lc3Backend, config)?;

    let frames = encoder.encode(pcm);
    let out = decoder.decode(&frames);
    print_stats("encoder", &encoder.stats());
    print_stats("decoder", &decoder.stats());
    Ok(out)
}
