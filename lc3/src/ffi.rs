//! FFI bindings to liblc3.

use std::os::raw::{c_int, c_uint, c_void};

/// Opaque encoder state, placed in caller-provided memory.
pub enum Lc3Encoder {}

/// Opaque decoder state, placed in caller-provided memory.
pub enum Lc3Decoder {}

/// `enum lc3_pcm_format` (from lc3.h)
pub type Lc3PcmFormat = c_int;

// PCM formats
pub const LC3_PCM_FORMAT_S16: Lc3PcmFormat = 0;

// Decode return codes
pub const LC3_DECODE_OK: c_int = 0;
pub const LC3_DECODE_PLC: c_int = 1;

unsafe extern "C" {
    // Geometry
    pub fn lc3_frame_samples(dt_us: c_int, sr_hz: c_int) -> c_int;

    // Encoder
    pub fn lc3_encoder_size(dt_us: c_int, sr_hz: c_int) -> c_uint;

    pub fn lc3_setup_encoder(
        dt_us: c_int,
        sr_hz: c_int,
        sr_pcm_hz: c_int,
        mem: *mut c_void,
    ) -> *mut Lc3Encoder;

    pub fn lc3_encode(
        encoder: *mut Lc3Encoder,
        fmt: Lc3PcmFormat,
        pcm: *const c_void,
        stride: c_int,
        nbytes: c_int,
        out: *mut c_void,
    ) -> c_int;

    // Decoder
    pub fn lc3_decoder_size(dt_us: c_int, sr_hz: c_int) -> c_uint;

    pub fn lc3_setup_decoder(
        dt_us: c_int,
        sr_hz: c_int,
        sr_pcm_hz: c_int,
        mem: *mut c_void,
    ) -> *mut Lc3Decoder;

    pub fn lc3_decode(
        decoder: *mut Lc3Decoder,
        data: *const c_void,
        nbytes: c_int,
        fmt: Lc3PcmFormat,
        pcm: *mut c_void,
        stride: c_int,
    ) -> c_int;
}
