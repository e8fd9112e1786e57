//! Sentinel-valued boundary API.
//!
//! Outer layers (JNI/FFI shims, RPC dispatch) cannot carry Rust errors.
//! This facade maps session-level failures to a zero token or an empty
//! buffer and logs them. Per-frame failures never reach it; they are
//! concealed inside the transcode loop.

use tracing::{error, warn};

use crate::codec::Backend;
use crate::config::Config;
use crate::error::Result;
use crate::session::SessionKind;
use crate::table::{Handle, HandleTable};

/// Token value returned when a session could not be created.
pub const INVALID_TOKEN: u64 = 0;

/// Integer-token facade over a [`HandleTable`].
pub struct Bridge<B: Backend> {
    table: HandleTable<B>,
}

impl<B: Backend> Bridge<B> {
    /// Creates a bridge with the default configuration
    /// (10ms frames, 16kHz, 20 byte frames).
    pub fn new(backend: B) -> Self {
        Self {
            table: HandleTable::with_valid_config(backend, Config::default()),
        }
    }

    /// Creates a bridge with a custom configuration.
    pub fn with_config(backend: B, config: Config) -> Result<Self> {
        Ok(Self {
            table: HandleTable::new(backend, config)?,
        })
    }

    /// Returns the underlying handle table.
    pub fn table(&self) -> &HandleTable<B> {
        &self.table
    }

    /// Creates an encoder session. Returns [`INVALID_TOKEN`] on failure.
    pub fn create_encoder_session(&self) -> u64 {
        match self.table.create_encoder() {
            Ok(handle) => handle.get(),
            Err(err) => {
                error!(%err, "lc3 encoder session failed");
                INVALID_TOKEN
            }
        }
    }

    /// Creates a decoder session. Returns [`INVALID_TOKEN`] on failure.
    pub fn create_decoder_session(&self) -> u64 {
        match self.table.create_decoder() {
            Ok(handle) => handle.get(),
            Err(err) => {
                error!(%err, "lc3 decoder session failed");
                INVALID_TOKEN
            }
        }
    }

    /// Releases an encoder session. Unknown tokens and decoder tokens are
    /// ignored.
    pub fn release_encoder_session(&self, token: u64) {
        self.release(token, SessionKind::Encoder);
    }

    /// Releases a decoder session. Unknown tokens and encoder tokens are
    /// ignored.
    pub fn release_decoder_session(&self, token: u64) {
        self.release(token, SessionKind::Decoder);
    }

    fn release(&self, token: u64, kind: SessionKind) {
        let Some(handle) = Handle::from_raw(token) else {
            return;
        };
        if let Err(err) = self.table.release_kind(handle, kind) {
            warn!(%err, "lc3 release ignored");
        }
    }

    /// Encodes s16le mono PCM. Returns an empty buffer for an invalid
    /// token or input shorter than one frame.
    pub fn encode(&self, token: u64, pcm: &[u8]) -> Vec<u8> {
        let Some(handle) = Handle::from_raw(token) else {
            warn!("lc3 encode with null token");
            return Vec::new();
        };
        self.table.encode(handle, pcm).unwrap_or_else(|err| {
            warn!(%err, "lc3 encode rejected");
            Vec::new()
        })
    }

    /// Decodes LC3 frames to s16le mono PCM. Returns an empty buffer for an
    /// invalid token or input shorter than one frame.
    pub fn decode(&self, token: u64, data: &[u8]) -> Vec<u8> {
        let Some(handle) = Handle::from_raw(token) else {
            warn!("lc3 decode with null token");
            return Vec::new();
        };
        self.table.decode(handle, data).unwrap_or_else(|err| {
            warn!(%err, "lc3 decode rejected");
            Vec::new()
        })
    }
}

#[cfg(feature = "liblc3")]
mod global {
    use once_cell::sync::Lazy;

    use super::Bridge;
    use crate::lc3::Lc3Backend;

    static GLOBAL: Lazy<Bridge<Lc3Backend>> = Lazy::new(|| Bridge::new(Lc3Backend));

    /// Returns the process-wide bridge using liblc3 and the default
    /// configuration.
    pub fn global() -> &'static Bridge<Lc3Backend> {
        &GLOBAL
    }

    /// Creates an encoder session on the global bridge; 0 on failure.
    pub fn create_encoder_session() -> u64 {
        GLOBAL.create_encoder_session()
    }

    /// Creates a decoder session on the global bridge; 0 on failure.
    pub fn create_decoder_session() -> u64 {
        GLOBAL.create_decoder_session()
    }

    /// Releases an encoder session on the global bridge.
    pub fn release_encoder_session(token: u64) {
        GLOBAL.release_encoder_session(token)
    }

    /// Releases a decoder session on the global bridge.
    pub fn release_decoder_session(token: u64) {
        GLOBAL.release_decoder_session(token)
    }

    /// Encodes PCM with a global encoder session.
    pub fn encode(token: u64, pcm: &[u8]) -> Vec<u8> {
        GLOBAL.encode(token, pcm)
    }

    /// Decodes LC3 frames with a global decoder session.
    pub fn decode(token: u64, data: &[u8]) -> Vec<u8> {
        GLOBAL.decode(token, data)
    }
}

#[cfg(feature = "liblc3")]
pub use global::*;
