//! Whole-buffer encode and decode.
//!
//! A buffer is cut into complete frames, each frame goes through the codec
//! once, in order, and the results are written into one output buffer
//! sized up front. A frame the encoder rejects becomes an all-zero frame;
//! it never fails the buffer.

use tracing::{debug, warn};

use crate::codec::{DecodeStatus, FrameDecoder, FrameEncoder};
use crate::frame::FrameGeometry;
use crate::sample::{read_frame, write_samples};

/// Per-frame outcome counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frames processed.
    pub frames: u64,
    /// Encoded frames replaced with zero bytes after an encode failure.
    pub substituted: u64,
    /// Decoded frames the codec filled by packet-loss concealment.
    pub concealed: u64,
    /// Decoded frames the codec rejected.
    pub failed: u64,
}

impl std::ops::AddAssign for FrameStats {
    fn add_assign(&mut self, rhs: Self) {
        self.frames += rhs.frames;
        self.substituted += rhs.substituted;
        self.concealed += rhs.concealed;
        self.failed += rhs.failed;
    }
}

/// Encodes every complete PCM frame in `pcm`.
///
/// Returns `geometry.encoded_len(pcm.len())` bytes; trailing PCM that does
/// not fill a frame is dropped.
pub fn encode_buffer<E: FrameEncoder + ?Sized>(
    encoder: &mut E,
    geometry: &FrameGeometry,
    pcm: &[u8],
) -> (Vec<u8>, FrameStats) {
    let mut stats = FrameStats::default();
    let mut out = vec![0u8; geometry.encoded_len(pcm.len())];
    if out.is_empty() {
        return (out, stats);
    }

    let mut samples = vec![0i16; geometry.samples_per_frame];
    for (i, slot) in out.chunks_exact_mut(geometry.frame_bytes).enumerate() {
        read_frame(pcm, i, geometry, &mut samples);
        if let Err(err) = encoder.encode_frame(&samples, slot) {
            warn!(frame = i, %err, "lc3 encode failed, substituting silence");
            slot.fill(0);
            stats.substituted += 1;
        }
        stats.frames += 1;
    }

    (out, stats)
}

/// Decodes every complete compressed frame in `data`.
///
/// Returns `geometry.decoded_len(data.len())` bytes of little-endian PCM;
/// a trailing partial frame is dropped.
pub fn decode_buffer<D: FrameDecoder + ?Sized>(
    decoder: &mut D,
    geometry: &FrameGeometry,
    data: &[u8],
) -> (Vec<u8>, FrameStats) {
    let mut stats = FrameStats::default();
    let mut out = vec![0u8; geometry.decoded_len(data.len())];
    if out.is_empty() {
        return (out, stats);
    }

    let mut samples = vec![0i16; geometry.samples_per_frame];
    let frames = data.chunks_exact(geometry.frame_bytes);
    let slots = out.chunks_exact_mut(geometry.pcm_frame_bytes);
    for (i, (frame, slot)) in frames.zip(slots).enumerate() {
        match decoder.decode_frame(frame, &mut samples) {
            Ok(DecodeStatus::Decoded) => {}
            Ok(DecodeStatus::Concealed) => {
                debug!(frame = i, "lc3 frame concealed");
                stats.concealed += 1;
            }
            Err(err) => {
                warn!(frame = i, %err, "lc3 decode failed");
                stats.failed += 1;
            }
        }
        write_samples(&samples, slot);
        // Whatever a short decode leaves behind must not reach the next frame.
        samples.fill(0);
        stats.frames += 1;
    }

    (out, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FrameError;
    use crate::sample::samples_to_bytes;

    const GEOMETRY: FrameGeometry = FrameGeometry::new(10_000, 16_000, 20);

    /// Writes the frame's first sample and call index; fails on listed calls.
    #[derive(Default)]
    struct FakeEncoder {
        calls: usize,
        fail_on: Vec<usize>,
    }

    impl FrameEncoder for FakeEncoder {
        fn encode_frame(&mut self, pcm: &[i16], out: &mut [u8]) -> Result<(), FrameError> {
            let call = self.calls;
            self.calls += 1;
            // Leave garbage behind to prove the fallback overwrites it.
            out.fill(0xee);
            if self.fail_on.contains(&call) {
                return Err(FrameError::Rejected(-1));
            }
            out[..2].copy_from_slice(&pcm[0].to_le_bytes());
            out[2] = call as u8;
            Ok(())
        }
    }

    /// Expands byte 0 of each frame into a constant frame; writes only
    /// half a frame for frames starting with 0xff.
    struct FakeDecoder {
        status: Result<DecodeStatus, FrameError>,
    }

    impl FrameDecoder for FakeDecoder {
        fn decode_frame(&mut self, frame: &[u8], pcm: &mut [i16]) -> Result<DecodeStatus, FrameError> {
            let n = if frame[0] == 0xff { pcm.len() / 2 } else { pcm.len() };
            pcm[..n].fill(frame[0] as i16);
            self.status.clone()
        }
    }

    fn ok_decoder() -> FakeDecoder {
        FakeDecoder { status: Ok(DecodeStatus::Decoded) }
    }

    #[test]
    fn test_encode_empty() {
        let mut encoder = FakeEncoder::default();
        let (out, stats) = encode_buffer(&mut encoder, &GEOMETRY, &[]);
        assert!(out.is_empty());
        assert_eq!(stats, FrameStats::default());
        assert_eq!(encoder.calls, 0);
    }

    #[test]
    fn test_encode_short_input() {
        let mut encoder = FakeEncoder::default();
        let (out, _) = encode_buffer(&mut encoder, &GEOMETRY, &[1u8; 319]);
        assert!(out.is_empty());
        assert_eq!(encoder.calls, 0);
    }

    #[test]
    fn test_encode_drops_trailing_bytes() {
        let mut encoder = FakeEncoder::default();
        let (out, stats) = encode_buffer(&mut encoder, &GEOMETRY, &[0u8; 320 * 3 + 100]);
        assert_eq!(out.len(), 60);
        assert_eq!(stats.frames, 3);
        assert_eq!(encoder.calls, 3);
    }

    #[test]
    fn test_encode_frames_in_order() {
        let samples: Vec<i16> = (0..480).map(|i| (i / 160) as i16 * 1000 - 1000).collect();
        let pcm = samples_to_bytes(&samples);

        let mut encoder = FakeEncoder::default();
        let (out, _) = encode_buffer(&mut encoder, &GEOMETRY, &pcm);

        for (i, frame) in out.chunks(20).enumerate() {
            let first = i16::from_le_bytes([frame[0], frame[1]]);
            assert_eq!(first, i as i16 * 1000 - 1000);
            assert_eq!(frame[2], i as u8);
        }
    }

    #[test]
    fn test_encode_failure_becomes_zero_frame() {
        let pcm = samples_to_bytes(&vec![500i16; 160 * 4]);
        let mut encoder = FakeEncoder { fail_on: vec![2], ..Default::default() };
        let (out, stats) = encode_buffer(&mut encoder, &GEOMETRY, &pcm);

        assert_eq!(out.len(), 80);
        assert!(out[40..60].iter().all(|&b| b == 0));
        for i in [0usize, 1, 3] {
            let frame = &out[i * 20..(i + 1) * 20];
            assert_eq!(i16::from_le_bytes([frame[0], frame[1]]), 500);
            assert_eq!(frame[2], i as u8);
        }
        assert_eq!(stats.frames, 4);
        assert_eq!(stats.substituted, 1);
    }

    #[test]
    fn test_encode_all_frames_fail() {
        let mut encoder = FakeEncoder { fail_on: vec![0, 1], ..Default::default() };
        let (out, stats) = encode_buffer(&mut encoder, &GEOMETRY, &[0x11u8; 640]);
        assert_eq!(out, vec![0u8; 40]);
        assert_eq!(stats.substituted, 2);
    }

    #[test]
    fn test_decode_empty_and_short() {
        let mut decoder = ok_decoder();
        assert!(decode_buffer(&mut decoder, &GEOMETRY, &[]).0.is_empty());
        assert!(decode_buffer(&mut decoder, &GEOMETRY, &[1u8; 19]).0.is_empty());
    }

    #[test]
    fn test_decode_lengths() {
        let mut decoder = ok_decoder();
        let (out, stats) = decode_buffer(&mut decoder, &GEOMETRY, &[3u8; 45]);
        assert_eq!(out.len(), 640);
        assert_eq!(stats.frames, 2);
        assert!(out.chunks(2).all(|s| s == [3, 0]));
    }

    #[test]
    fn test_decode_partial_write_does_not_leak() {
        let mut data = vec![7u8; 20];
        data.extend_from_slice(&[0xffu8; 20]);

        let mut decoder = ok_decoder();
        let (out, _) = decode_buffer(&mut decoder, &GEOMETRY, &data);

        let second = &out[320..];
        // First half written by the codec, second half must be silence.
        assert!(second[..160].chunks(2).all(|s| s == (0xff as i16).to_le_bytes()));
        assert!(second[160..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_decode_counts_concealed_and_failed() {
        let mut decoder = FakeDecoder { status: Ok(DecodeStatus::Concealed) };
        let (_, stats) = decode_buffer(&mut decoder, &GEOMETRY, &[1u8; 60]);
        assert_eq!(stats.concealed, 3);

        let mut decoder = FakeDecoder { status: Err(FrameError::Rejected(-1)) };
        let (out, stats) = decode_buffer(&mut decoder, &GEOMETRY, &[1u8; 40]);
        assert_eq!(out.len(), 640);
        assert_eq!(stats.failed, 2);
        assert_eq!(stats.frames, 2);
    }

    #[test]
    fn test_frame_stats_add_assign() {
        let mut total = FrameStats { frames: 2, substituted: 1, concealed: 0, failed: 0 };
        total += FrameStats { frames: 3, substituted: 0, concealed: 1, failed: 2 };
        assert_eq!(total, FrameStats { frames: 5, substituted: 1, concealed: 1, failed: 2 });
    }
}
