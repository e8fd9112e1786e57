//! Chunked streaming on top of sessions.
//!
//! Microphone and BLE chunks rarely line up with codec frames. The stream
//! types keep the bytes after the last complete frame and prepend them to
//! the next chunk, so no audio is lost between chunks. Nothing is ever
//! padded: bytes still pending when the stream is dropped are discarded.

use crate::codec::{FrameDecoder, FrameEncoder};
use crate::session::{DecoderSession, EncoderSession};

/// Encodes a PCM stream delivered in arbitrary chunks.
pub struct StreamEncoder<E> {
    session: EncoderSession<E>,
    pending: Vec<u8>,
}

impl<E: FrameEncoder> StreamEncoder<E> {
    /// Creates a stream encoder over `session`.
    pub fn new(session: EncoderSession<E>) -> Self {
        let capacity = session.geometry().pcm_frame_bytes;
        Self {
            session,
            pending: Vec::with_capacity(capacity),
        }
    }

    /// Appends `chunk` and encodes every frame that is now complete.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<u8> {
        let frame_bytes = self.session.geometry().pcm_frame_bytes;
        if self.pending.is_empty() {
            let out = self.session.encode(chunk);
            let tail = self.session.geometry().pcm_remainder(chunk.len());
            self.pending.extend_from_slice(&chunk[chunk.len() - tail..]);
            return out;
        }

        self.pending.extend_from_slice(chunk);
        let out = self.session.encode(&self.pending);
        let used = self.session.geometry().pcm_frames(self.pending.len()) * frame_bytes;
        self.pending.drain(..used);
        out
    }

    /// Returns the number of PCM bytes waiting for a complete frame.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Drops any pending bytes.
    pub fn reset(&mut self) {
        self.pending.clear();
    }

    /// Returns the underlying session.
    pub fn session(&self) -> &EncoderSession<E> {
        &self.session
    }

    /// Consumes the stream, returning the session. Pending bytes are lost.
    pub fn into_session(self) -> EncoderSession<E> {
        self.session
    }
}

/// Decodes a compressed stream delivered in arbitrary packets.
pub struct StreamDecoder<D> {
    session: DecoderSession<D>,
    pending: Vec<u8>,
}

impl<D: FrameDecoder> StreamDecoder<D> {
    /// Creates a stream decoder over `session`.
    pub fn new(session: DecoderSession<D>) -> Self {
        let capacity = session.geometry().frame_bytes;
        Self {
            session,
            pending: Vec::with_capacity(capacity),
        }
    }

    /// Appends `packet` and decodes every frame that is now complete.
    pub fn push(&mut self, packet: &[u8]) -> Vec<u8> {
        self.pending.extend_from_slice(packet);
        let out = self.session.decode(&self.pending);
        let used = self.session.geometry().compressed_frames(self.pending.len())
            * self.session.geometry().frame_bytes;
        self.pending.drain(..used);
        out
    }

    /// Returns the number of compressed bytes waiting for a complete frame.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Drops any pending bytes.
    pub fn reset(&mut self) {
        self.pending.clear();
    }

    /// Returns the underlying session.
    pub fn session(&self) -> &DecoderSession<D> {
        &self.session
    }

    /// Consumes the stream, returning the session. Pending bytes are lost.
    pub fn into_session(self) -> DecoderSession<D> {
        self.session
    }
}
