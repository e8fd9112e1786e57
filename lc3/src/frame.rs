//! Frame geometry and segmentation.

use std::time::Duration;

/// Bytes per 16-bit PCM sample.
pub const PCM_SAMPLE_BYTES: usize = 2;

/// Sizes of one frame on both sides of the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGeometry {
    /// Frame duration in microseconds.
    pub frame_duration_us: u32,
    /// PCM sample rate in Hz.
    pub sample_rate_hz: u32,
    /// Mono samples per frame.
    pub samples_per_frame: usize,
    /// PCM bytes per frame (`samples_per_frame * 2`).
    pub pcm_frame_bytes: usize,
    /// Compressed bytes per frame.
    pub frame_bytes: usize,
}

impl FrameGeometry {
    /// Derives the geometry for a frame duration, sample rate and
    /// compressed frame size.
    pub const fn new(frame_duration_us: u32, sample_rate_hz: u32, frame_bytes: usize) -> Self {
        let samples_per_frame =
            (frame_duration_us as u64 * sample_rate_hz as u64 / 1_000_000) as usize;
        Self {
            frame_duration_us,
            sample_rate_hz,
            samples_per_frame,
            pcm_frame_bytes: samples_per_frame * PCM_SAMPLE_BYTES,
            frame_bytes,
        }
    }

    /// Number of complete PCM frames in `pcm_len` bytes.
    pub fn pcm_frames(&self, pcm_len: usize) -> usize {
        frame_count(pcm_len, self.pcm_frame_bytes)
    }

    /// Number of complete compressed frames in `data_len` bytes.
    pub fn compressed_frames(&self, data_len: usize) -> usize {
        frame_count(data_len, self.frame_bytes)
    }

    /// Length of the compressed output for `pcm_len` bytes of PCM.
    pub fn encoded_len(&self, pcm_len: usize) -> usize {
        self.pcm_frames(pcm_len) * self.frame_bytes
    }

    /// Length of the PCM output for `data_len` compressed bytes.
    pub fn decoded_len(&self, data_len: usize) -> usize {
        self.compressed_frames(data_len) * self.pcm_frame_bytes
    }

    /// PCM bytes left over after the last complete frame.
    pub fn pcm_remainder(&self, pcm_len: usize) -> usize {
        pcm_len - self.pcm_frames(pcm_len) * self.pcm_frame_bytes
    }

    /// Returns the duration of one frame.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_micros(self.frame_duration_us as u64)
    }
}

/// Number of complete frames of `bytes_per_frame` in a buffer of
/// `buffer_len` bytes. Trailing bytes are not counted.
#[inline]
pub fn frame_count(buffer_len: usize, bytes_per_frame: usize) -> usize {
    if bytes_per_frame == 0 {
        return 0;
    }
    buffer_len / bytes_per_frame
}
