//! Encoder and decoder sessions.
//!
//! A session pairs one codec instance with the geometry it was created for
//! and keeps running frame statistics. Sessions are not reentrant: every
//! call takes `&mut self`, so concurrent use needs external serialisation
//! (the handle table provides it).

use std::fmt;

use crate::codec::{Backend, FrameDecoder, FrameEncoder};
use crate::config::Config;
use crate::error::Result;
use crate::frame::FrameGeometry;
use crate::transcode::{FrameStats, decode_buffer, encode_buffer};

/// Direction of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKind {
    Encoder,
    Decoder,
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encoder => write!(f, "encoder"),
            Self::Decoder => write!(f, "decoder"),
        }
    }
}

/// PCM to LC3 session.
pub struct EncoderSession<E> {
    encoder: E,
    geometry: FrameGeometry,
    stats: FrameStats,
}

impl<E: FrameEncoder> EncoderSession<E> {
    /// Wraps an encoder created for `config`.
    pub fn new(encoder: E, config: &Config) -> Self {
        Self {
            encoder,
            geometry: config.geometry(),
            stats: FrameStats::default(),
        }
    }

    /// Creates the encoder through `backend`.
    pub fn open<B>(backend: &B, config: &Config) -> Result<Self>
    where
        B: Backend<Encoder = E>,
    {
        Ok(Self::new(backend.new_encoder(config)?, config))
    }

    /// Encodes all complete frames of `pcm` (s16le mono).
    pub fn encode(&mut self, pcm: &[u8]) -> Vec<u8> {
        let (out, stats) = encode_buffer(&mut self.encoder, &self.geometry, pcm);
        self.stats += stats;
        out
    }

    /// Encodes all complete frames of `samples`.
    pub fn encode_samples(&mut self, samples: &[i16]) -> Vec<u8> {
        self.encode(&crate::sample::samples_to_bytes(samples))
    }

    /// Returns the frame geometry.
    pub fn geometry(&self) -> &FrameGeometry {
        &self.geometry
    }

    /// Returns the statistics accumulated since creation.
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Returns the underlying encoder.
    pub fn encoder_mut(&mut self) -> &mut E {
        &mut self.encoder
    }
}

/// LC3 to PCM session.
pub struct DecoderSession<D> {
    decoder: D,
    geometry: FrameGeometry,
    stats: FrameStats,
}

impl<D: FrameDecoder> DecoderSession<D> {
    /// Wraps a decoder created for `config`.
    pub fn new(decoder: D, config: &Config) -> Self {
        Self {
            decoder,
            geometry: config.geometry(),
            stats: FrameStats::default(),
        }
    }

    /// Creates the decoder through `backend`.
    pub fn open<B>(backend: &B, config: &Config) -> Result<Self>
    where
        B: Backend<Decoder = D>,
    {
        Ok(Self::new(backend.new_decoder(config)?, config))
    }

    /// Decodes all complete frames of `data` into s16le mono PCM.
    pub fn decode(&mut self, data: &[u8]) -> Vec<u8> {
        let (out, stats) = decode_buffer(&mut self.decoder, &self.geometry, data);
        self.stats += stats;
        out
    }

    /// Returns the frame geometry.
    pub fn geometry(&self) -> &FrameGeometry {
        &self.geometry
    }

    /// Returns the statistics accumulated since creation.
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Returns the underlying decoder.
    pub fn decoder_mut(&mut self) -> &mut D {
        &mut self.decoder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::DecodeStatus;
    use crate::error::FrameError;

    struct CountingEncoder {
        history: i16,
    }

    impl FrameEncoder for CountingEncoder {
        fn encode_frame(&mut self, pcm: &[i16], out: &mut [u8]) -> std::result::Result<(), FrameError> {
            // Carries state across frames and calls, like a real codec.
            self.history = self.history.wrapping_add(1);
            out.fill(0);
            out[0] = self.history as u8;
            out[1] = pcm[0] as u8;
            Ok(())
        }
    }

    struct EchoDecoder;

    impl FrameDecoder for EchoDecoder {
        fn decode_frame(
            &mut self,
            frame: &[u8],
            pcm: &mut [i16],
        ) -> std::result::Result<DecodeStatus, FrameError> {
            pcm.fill(frame[1] as i16);
            Ok(DecodeStatus::Decoded)
        }
    }

    #[test]
    fn test_session_kind_display() {
        assert_eq!(SessionKind::Encoder.to_string(), "encoder");
        assert_eq!(SessionKind::Decoder.to_string(), "decoder");
    }

    #[test]
    fn test_encoder_state_persists_across_calls() {
        let mut session = EncoderSession::new(CountingEncoder { history: 0 }, &Config::default());
        let first = session.encode(&[0u8; 640]);
        let second = session.encode(&[0u8; 320]);

        assert_eq!(first[0], 1);
        assert_eq!(first[20], 2);
        assert_eq!(second[0], 3);
        assert_eq!(session.stats().frames, 3);
    }

    #[test]
    fn test_encode_samples() {
        let mut session = EncoderSession::new(CountingEncoder { history: 0 }, &Config::default());
        let out = session.encode_samples(&[9i16; 160]);
        assert_eq!(out.len(), 20);
        assert_eq!(out[1], 9);
    }

    #[test]
    fn test_decoder_session() {
        let mut session = DecoderSession::new(EchoDecoder, &Config::default());
        let mut frame = vec![0u8; 20];
        frame[1] = 42;

        let pcm = session.decode(&frame);
        assert_eq!(pcm.len(), 320);
        assert_eq!(&pcm[..2], &[42, 0]);
        assert_eq!(session.stats().frames, 1);
        assert_eq!(session.geometry().samples_per_frame, 160);
    }
}
