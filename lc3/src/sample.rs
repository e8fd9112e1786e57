//! Little-endian 16-bit PCM sample conversion.
//!
//! PCM arrives as raw bytes from the transport. Samples are rebuilt with an
//! explicit byte order so the result does not depend on the host.

use crate::frame::{FrameGeometry, PCM_SAMPLE_BYTES};

/// Reads the little-endian sample starting at `offset`.
///
/// Returns 0 (silence) when the byte pair would extend past the end of
/// `pcm`.
#[inline]
pub fn read_sample(pcm: &[u8], offset: usize) -> i16 {
    match pcm.get(offset..offset + PCM_SAMPLE_BYTES) {
        // The low byte is taken unsigned so it cannot sign-extend into the high byte.
        Some(&[low, high]) => ((high as i8 as i16) << 8) | low as i16,
        _ => 0,
    }
}

/// Fills `out` with the samples of frame `frame_index` of `pcm`.
///
/// `out` must hold `geometry.samples_per_frame` samples; any sample whose
/// bytes fall outside `pcm` is written as 0.
pub fn read_frame(pcm: &[u8], frame_index: usize, geometry: &FrameGeometry, out: &mut [i16]) {
    let base = frame_index * geometry.pcm_frame_bytes;
    for (j, sample) in out.iter_mut().take(geometry.samples_per_frame).enumerate() {
        *sample = read_sample(pcm, base + j * PCM_SAMPLE_BYTES);
    }
}

/// Writes `samples` as little-endian byte pairs into `out`.
///
/// Stops at whichever of `samples` or `out` runs out first.
pub fn write_samples(samples: &[i16], out: &mut [u8]) {
    for (sample, dst) in samples.iter().zip(out.chunks_exact_mut(PCM_SAMPLE_BYTES)) {
        dst.copy_from_slice(&sample.to_le_bytes());
    }
}

/// Converts samples to little-endian PCM bytes.
pub fn samples_to_bytes(samples: &[i16]) -> Vec<u8> {
    let mut out = vec![0u8; samples.len() * PCM_SAMPLE_BYTES];
    write_samples(samples, &mut out);
    out
}

/// Converts little-endian PCM bytes to samples. A trailing odd byte is
/// ignored.
pub fn bytes_to_samples(pcm: &[u8]) -> Vec<i16> {
    pcm.chunks_exact(PCM_SAMPLE_BYTES)
        .map(|b| i16::from_le_bytes([b[0], b[1]]))
        .collect()
}
