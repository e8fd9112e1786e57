//! Codec configuration.
//!
//! A configuration fixes the frame geometry of every session created from
//! it. Both ends of a stream must agree on it: the bridge does not carry
//! the configuration in-band.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Lc3Error, Result};
use crate::frame::FrameGeometry;

/// Default frame duration (10ms).
pub const DEFAULT_FRAME_DURATION_US: u32 = 10_000;

/// Default sample rate (16kHz).
pub const DEFAULT_SAMPLE_RATE_HZ: u32 = 16_000;

/// Default compressed frame size (20 bytes per 10ms frame, 16kbps).
pub const DEFAULT_FRAME_BYTES: usize = 20;

/// Frame durations supported by LC3.
pub const FRAME_DURATIONS_US: [u32; 2] = [7_500, 10_000];

/// Sample rates supported by LC3.
pub const SAMPLE_RATES_HZ: [u32; 5] = [8_000, 16_000, 24_000, 32_000, 48_000];

/// Smallest compressed frame LC3 accepts.
pub const MIN_FRAME_BYTES: usize = 20;

/// Largest compressed frame LC3 accepts.
pub const MAX_FRAME_BYTES: usize = 400;

/// LC3 session configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Frame duration in microseconds.
    pub frame_duration_us: u32,
    /// PCM sample rate in Hz.
    pub sample_rate_hz: u32,
    /// Size of one compressed frame in bytes.
    pub frame_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame_duration_us: DEFAULT_FRAME_DURATION_US,
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
            frame_bytes: DEFAULT_FRAME_BYTES,
        }
    }
}

impl Config {
    /// Creates a validated configuration.
    pub fn new(frame_duration_us: u32, sample_rate_hz: u32, frame_bytes: usize) -> Result<Self> {
        let config = Self {
            frame_duration_us,
            sample_rate_hz,
            frame_bytes,
        };
        config.validate()?;
        Ok(config)
    }

    /// Creates a configuration whose frame size matches a target bitrate.
    pub fn with_bitrate(frame_duration_us: u32, sample_rate_hz: u32, bitrate_bps: u32) -> Result<Self> {
        let frame_bytes = bitrate_bps as u64 * frame_duration_us as u64 / 8_000_000;
        Self::new(frame_duration_us, sample_rate_hz, frame_bytes as usize)
    }

    /// Checks the configuration against what LC3 supports.
    pub fn validate(&self) -> Result<()> {
        if !FRAME_DURATIONS_US.contains(&self.frame_duration_us) {
            return Err(Lc3Error::InvalidConfig(format!(
                "frame duration {}us not in {:?}",
                self.frame_duration_us, FRAME_DURATIONS_US
            )));
        }
        if !SAMPLE_RATES_HZ.contains(&self.sample_rate_hz) {
            return Err(Lc3Error::InvalidConfig(format!(
                "sample rate {}Hz not in {:?}",
                self.sample_rate_hz, SAMPLE_RATES_HZ
            )));
        }
        if !(MIN_FRAME_BYTES..=MAX_FRAME_BYTES).contains(&self.frame_bytes) {
            return Err(Lc3Error::InvalidConfig(format!(
                "frame size {} bytes not in {}..={}",
                self.frame_bytes, MIN_FRAME_BYTES, MAX_FRAME_BYTES
            )));
        }
        Ok(())
    }

    /// Returns the frame geometry derived from this configuration.
    pub fn geometry(&self) -> FrameGeometry {
        FrameGeometry::new(self.frame_duration_us, self.sample_rate_hz, self.frame_bytes)
    }

    /// Returns the frame duration.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_micros(self.frame_duration_us as u64)
    }

    /// Returns the compressed bitrate in bits per second.
    pub fn bitrate_bps(&self) -> u32 {
        (self.frame_bytes as u64 * 8 * 1_000_000 / self.frame_duration_us.max(1) as u64) as u32
    }

    /// Parses and validates a YAML configuration.
    pub fn from_yaml(s: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(s).map_err(|e| Lc3Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s).map_err(|e| Lc3Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file. `.json` files are parsed as JSON,
    /// everything else as YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_yaml(&content),
        }
    }
}
