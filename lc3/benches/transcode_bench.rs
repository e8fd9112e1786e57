use criterion::{black_box, criterion_group, criterion_main, Criterion};
use giztoy_lc3::sample::samples_to_bytes;
use giztoy_lc3::{
    decode_buffer, encode_buffer, Config, DecodeStatus, FrameDecoder, FrameEncoder, FrameError,
};

/// Folds samples into the frame; cheap enough that the bench measures
/// segmentation, sample conversion and assembly.
struct FoldEncoder;

impl FrameEncoder for FoldEncoder {
    fn encode_frame(&mut self, pcm: &[i16], out: &mut [u8]) -> Result<(), FrameError> {
        let len = out.len();
        for (i, s) in pcm.iter().enumerate() {
            out[i % len] ^= *s as u8;
        }
        Ok(())
    }
}

struct FillDecoder;

impl FrameDecoder for FillDecoder {
    fn decode_frame(&mut self, frame: &[u8], pcm: &mut [i16]) -> Result<DecodeStatus, FrameError> {
        pcm.fill(frame[0] as i16);
        Ok(DecodeStatus::Decoded)
    }
}

fn bench_encode(c: &mut Criterion) {
    let geometry = Config::default().geometry();
    let samples: Vec<i16> = (0..16000).map(|i| (i % 2000) as i16 - 1000).collect();
    let pcm = samples_to_bytes(&samples);
    let mut encoder = FoldEncoder;

    c.bench_function("lc3_encode_buffer_1s", |b| {
        b.iter(|| {
            let (out, _) = encode_buffer(&mut encoder, &geometry, black_box(&pcm));
            black_box(out);
        });
    });
}

fn bench_decode(c: &mut Criterion) {
    let geometry = Config::default().geometry();
    let data: Vec<u8> = (0..2000).map(|i| i as u8).collect();
    let mut decoder = FillDecoder;

    c.bench_function("lc3_decode_buffer_1s", |b| {
        b.iter(|| {
            let (out, _) = decode_buffer(&mut decoder, &geometry, black_box(&data));
            black_box(out);
        });
    });
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
