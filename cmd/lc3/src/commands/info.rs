//! Configuration and geometry report.

use clap::Args;
use serde::Serialize;

use super::{get_config, output_result};
use crate::Cli;

/// Show codec configuration and frame geometry.
#[derive(Args)]
pub struct InfoCommand {}

#[derive(Serialize)]
struct Info {
    frame_duration_us: u32,
    sample_rate_hz: u32,
    frame_bytes: usize,
    bitrate_bps: u32,
    samples_per_frame: usize,
    pcm_frame_bytes: usize,
}

impl InfoCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let config = get_config(cli)?;
        let geometry = config.geometry();

        output_result(
            &Info {
                frame_duration_us: config.frame_duration_us,
                sample_rate_hz: config.sample_rate_hz,
                frame_bytes: config.frame_bytes,
                bitrate_bps: config.bitrate_bps(),
                samples_per_frame: geometry.samples_per_frame,
                pcm_frame_bytes: geometry.pcm_frame_bytes,
            },
            cli.json,
        )
    }
}
