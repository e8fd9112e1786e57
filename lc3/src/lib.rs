//! Persistent LC3 encoder/decoder sessions.
//!
//! This crate keeps LC3 codec state alive across many short transcode calls,
//! the way a wearable microphone stream needs it:
//!
//! - `config`: frame duration, sample rate and compressed frame size
//! - `frame`: frame geometry and segmentation of arbitrary-length buffers
//! - `sample`: little-endian 16-bit PCM conversion
//! - `transcode`: whole-buffer encode/decode with per-frame fallback
//! - `session` / `stream`: stateful sessions and chunked streaming
//! - `table` / `bridge`: integer-token session handles for outer layers
//! - `lc3`: the liblc3 backend (feature `liblc3`)
//!
//! # Example
//!
//! ```ignore
//! use giztoy_lc3::{Bridge, Lc3Backend};
//!
//! let bridge = Bridge::new(Lc3Backend);
//! let enc = bridge.create_encoder_session();
//! let dec = bridge.create_decoder_session();
//!
//! // 10ms of 16kHz mono PCM -> one 20 byte frame.
//! let frame = bridge.encode(enc, &[0u8; 320]);
//! let pcm = bridge.decode(dec, &frame);
//! assert_eq!(pcm.len(), 320);
//!
//! bridge.release_encoder_session(enc);
//! bridge.release_decoder_session(dec);
//! ```
//!
//! # Linking
//!
//! The `liblc3` feature links the system `liblc3` (set `LC3_LIB_DIR` to add
//! a search path). Without it the crate still provides the session, table
//! and bridge machinery for any [`Backend`].

pub mod bridge;
pub mod codec;
pub mod config;
mod error;
pub mod frame;
pub mod memory;
pub mod sample;
pub mod session;
pub mod stream;
pub mod table;
pub mod transcode;

#[cfg(feature = "liblc3")]
mod ffi;
#[cfg(feature = "liblc3")]
pub mod lc3;

pub use bridge::{Bridge, INVALID_TOKEN};
pub use codec::{Backend, DecodeStatus, FrameDecoder, FrameEncoder};
pub use config::Config;
pub use error::{FrameError, Lc3Error, Result};
pub use frame::{FrameGeometry, frame_count};
pub use session::{DecoderSession, EncoderSession, SessionKind};
pub use stream::{StreamDecoder, StreamEncoder};
pub use table::{Handle, HandleTable};
pub use transcode::{FrameStats, decode_buffer, encode_buffer};

#[cfg(feature = "liblc3")]
pub use lc3::{Lc3Backend, Lc3Decoder, Lc3Encoder};
