//! Per-frame codec primitives.
//!
//! The bridge drives any codec that can encode or decode one fixed-size
//! frame at a time against state it keeps between calls. The native LC3
//! backend lives in [`crate::lc3`] (feature `liblc3`).

use crate::config::Config;
use crate::error::{FrameError, Result};

/// Outcome of a successful frame decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStatus {
    /// The frame was decoded normally.
    Decoded,
    /// The codec replaced the frame with packet-loss concealment.
    Concealed,
}

/// Stateful encoder for one stream.
pub trait FrameEncoder {
    /// Encodes one frame of PCM samples into `out`.
    ///
    /// `pcm` holds exactly one frame of samples and `out` is exactly one
    /// compressed frame long. On error the contents of `out` are
    /// unspecified.
    fn encode_frame(&mut self, pcm: &[i16], out: &mut [u8]) -> std::result::Result<(), FrameError>;
}

/// Stateful decoder for one stream.
pub trait FrameDecoder {
    /// Decodes one compressed frame into `pcm`.
    ///
    /// On error the decoder may have written part of `pcm`.
    fn decode_frame(
        &mut self,
        frame: &[u8],
        pcm: &mut [i16],
    ) -> std::result::Result<DecodeStatus, FrameError>;
}

impl<E: FrameEncoder + ?Sized> FrameEncoder for Box<E> {
    fn encode_frame(&mut self, pcm: &[i16], out: &mut [u8]) -> std::result::Result<(), FrameError> {
        (**self).encode_frame(pcm, out)
    }
}

impl<D: FrameDecoder + ?Sized> FrameDecoder for Box<D> {
    fn decode_frame(
        &mut self,
        frame: &[u8],
        pcm: &mut [i16],
    ) -> std::result::Result<DecodeStatus, FrameError> {
        (**self).decode_frame(frame, pcm)
    }
}

/// Creates encoder and decoder state for a configuration.
pub trait Backend: Send + Sync {
    type Encoder: FrameEncoder + Send;
    type Decoder: FrameDecoder + Send;

    /// Allocates and initialises encoder state.
    fn new_encoder(&self, config: &Config) -> Result<Self::Encoder>;

    /// Allocates and initialises decoder state.
    fn new_decoder(&self, config: &Config) -> Result<Self::Decoder>;
}
