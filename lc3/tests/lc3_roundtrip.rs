//! Round trips through the native liblc3 backend.
//!
//! Run with: cargo test -p giztoy-lc3 --features liblc3

#![cfg(feature = "liblc3")]

use giztoy_lc3::sample::{bytes_to_samples, samples_to_bytes};
use giztoy_lc3::{Bridge, Config, Lc3Backend, StreamDecoder, StreamEncoder};
use giztoy_lc3::{DecoderSession, EncoderSession};

fn tone(freq: f32, amplitude: f32, samples: usize) -> Vec<i16> {
    (0..samples)
        .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / 16000.0).sin() * amplitude)
        .map(|s| s as i16)
        .collect()
}

/// Best normalised correlation of `b` against `a` over lags 0..=max_lag.
fn best_correlation(a: &[i16], b: &[i16], max_lag: usize) -> f64 {
    (0..=max_lag)
        .map(|lag| {
            let n = a.len().min(b.len() - lag);
            let (mut ab, mut aa, mut bb) = (0f64, 0f64, 0f64);
            for i in 0..n {
                let x = a[i] as f64;
                let y = b[i + lag] as f64;
                ab += x * y;
                aa += x * x;
                bb += y * y;
            }
            if aa == 0.0 || bb == 0.0 { 0.0 } else { ab / (aa * bb).sqrt() }
        })
        .fold(f64::MIN, f64::max)
}

#[test]
fn test_single_frame_tone() {
    let bridge = Bridge::new(Lc3Backend);
    let enc = bridge.create_encoder_session();
    let dec = bridge.create_decoder_session();
    assert_ne!(enc, 0);
    assert_ne!(dec, 0);

    let pcm = samples_to_bytes(&tone(1000.0, 10000.0, 160));
    assert_eq!(pcm.len(), 320);

    let frame = bridge.encode(enc, &pcm);
    assert_eq!(frame.len(), 20);

    let decoded = bridge.decode(dec, &frame);
    assert_eq!(decoded.len(), 320);
}

#[test]
fn test_tone_correlates_after_roundtrip() {
    let bridge = Bridge::new(Lc3Backend);
    let enc = bridge.create_encoder_session();
    let dec = bridge.create_decoder_session();

    let input = tone(1000.0, 10000.0, 160 * 50);
    let frames = bridge.encode(enc, &samples_to_bytes(&input));
    assert_eq!(frames.len(), 50 * 20);

    let output = bytes_to_samples(&bridge.decode(dec, &frames));
    assert_eq!(output.len(), input.len());

    // Skip codec start-up; allow for algorithmic delay.
    let a = &input[1600..6400];
    let b = &output[1600..];
    assert!(best_correlation(a, b, 160) > 0.8);
}

#[test]
fn test_silence_stays_near_silent() {
    let bridge = Bridge::new(Lc3Backend);
    let enc = bridge.create_encoder_session();
    let dec = bridge.create_decoder_session();

    let frames = bridge.encode(enc, &vec![0u8; 320 * 20]);
    let output = bytes_to_samples(&bridge.decode(dec, &frames));
    assert_eq!(output.len(), 160 * 20);
    assert!(output.iter().all(|&s| s.abs() < 64));
}

#[test]
fn test_empty_buffers() {
    let bridge = Bridge::new(Lc3Backend);
    let enc = bridge.create_encoder_session();
    let dec = bridge.create_decoder_session();
    assert!(bridge.encode(enc, &[]).is_empty());
    assert!(bridge.decode(dec, &[]).is_empty());
}

#[test]
fn test_higher_bitrate_config() {
    let config = Config::with_bitrate(10_000, 16_000, 32_000).unwrap();
    let bridge = Bridge::with_config(Lc3Backend, config).unwrap();
    let enc = bridge.create_encoder_session();
    let frames = bridge.encode(enc, &samples_to_bytes(&tone(440.0, 8000.0, 480)));
    assert_eq!(frames.len(), 3 * 40);
}

#[test]
fn test_streaming_chunks() {
    let config = Config::default();
    let encoder = EncoderSession::open(&Lc3Backend, &config).unwrap();
    let decoder = DecoderSession::open(&Lc3Backend, &config).unwrap();
    let mut enc = StreamEncoder::new(encoder);
    let mut dec = StreamDecoder::new(decoder);

    let pcm = samples_to_bytes(&tone(500.0, 6000.0, 160 * 10));
    let mut out = Vec::new();
    for chunk in pcm.chunks(250) {
        let frames = enc.push(chunk);
        for packet in frames.chunks(7) {
            out.extend(dec.push(packet));
        }
    }
    assert_eq!(out.len(), pcm.len());
    assert_eq!(enc.pending(), 0);
    assert_eq!(dec.pending(), 0);
}

#[test]
fn test_global_bridge() {
    let enc = giztoy_lc3::bridge::create_encoder_session();
    let dec = giztoy_lc3::bridge::create_decoder_session();
    let frame = giztoy_lc3::bridge::encode(enc, &[0u8; 320]);
    assert_eq!(giztoy_lc3::bridge::decode(dec, &frame).len(), 320);
    giztoy_lc3::bridge::release_encoder_session(enc);
    giztoy_lc3::bridge::release_decoder_session(dec);
    assert!(giztoy_lc3::bridge::encode(enc, &[0u8; 320]).is_empty());
}
