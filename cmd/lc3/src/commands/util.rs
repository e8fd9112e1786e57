//! Utility functions for CLI commands.

use anyhow::Context as _;
use giztoy_lc3::{Config, FrameStats};

use crate::Cli;

/// Loads the codec configuration, falling back to the default.
pub fn get_config(cli: &Cli) -> anyhow::Result<Config> {
    match cli.config.as_deref() {
        Some(path) => {
            Config::load(path).with_context(|| format!("failed to load config {}", path))
        }
        None => Ok(Config::default()),
    }
}

/// Reads a whole input file.
pub fn read_input(path: &str) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("failed to read {}", path))
}

/// Writes binary data to a file.
pub fn output_bytes(data: &[u8], output_path: &str) -> anyhow::Result<()> {
    std::fs::write(output_path, data).with_context(|| format!("failed to write {}", output_path))
}

/// Outputs result as JSON or YAML on stdout.
pub fn output_result<T: serde::Serialize>(result: &T, as_json: bool) -> anyhow::Result<()> {
    let output = if as_json {
        serde_json::to_string_pretty(result)? + "\n"
    } else {
        serde_yaml::to_string(result)?
    };
    print!("{}", output);
    Ok(())
}

/// Prints a success message to stderr.
pub fn print_success(msg: &str) {
    eprintln!("✓ {}", msg);
}

/// Prints frame statistics when any frame was not coded normally.
pub fn print_stats(label: &str, stats: &FrameStats) {
    if stats.substituted + stats.concealed + stats.failed == 0 {
        return;
    }
    eprintln!(
        "  {}: {} frames, {} substituted, {} concealed, {} failed",
        label, stats.frames, stats.substituted, stats.concealed, stats.failed
    );
}
