//! Native LC3 backend on top of liblc3.

use std::os::raw::{c_int, c_void};

use tracing::debug;

use crate::codec::{Backend, DecodeStatus, FrameDecoder, FrameEncoder};
use crate::config::Config;
use crate::error::{FrameError, Lc3Error, Result};
use crate::ffi::{self, Lc3Decoder as Lc3DecoderHandle, Lc3Encoder as Lc3EncoderHandle};
use crate::frame::FrameGeometry;
use crate::memory::StateBlock;
use crate::session::SessionKind;

/// Returns the samples per frame liblc3 reports, if it supports the pair.
pub fn frame_samples(frame_duration_us: u32, sample_rate_hz: u32) -> Option<usize> {
    let n = unsafe { ffi::lc3_frame_samples(frame_duration_us as c_int, sample_rate_hz as c_int) };
    (n > 0).then_some(n as usize)
}

fn check_geometry(kind: SessionKind, geometry: &FrameGeometry) -> Result<()> {
    match frame_samples(geometry.frame_duration_us, geometry.sample_rate_hz) {
        Some(n) if n == geometry.samples_per_frame => Ok(()),
        _ => Err(rejected(kind, geometry)),
    }
}

fn rejected(kind: SessionKind, geometry: &FrameGeometry) -> Lc3Error {
    Lc3Error::SetupRejected {
        kind,
        frame_duration_us: geometry.frame_duration_us,
        sample_rate_hz: geometry.sample_rate_hz,
    }
}

/// LC3 encoder state in an owned memory block.
pub struct Lc3Encoder {
    // Points into `block`, which outlives it.
    handle: *mut Lc3EncoderHandle,
    block: StateBlock,
    geometry: FrameGeometry,
}

// Safety: The encoder state is only reached through &mut self.
unsafe impl Send for Lc3Encoder {}

impl Lc3Encoder {
    /// Allocates and sets up an encoder for `config`.
    pub fn new(config: &Config) -> Result<Self> {
        let geometry = config.geometry();
        check_geometry(SessionKind::Encoder, &geometry)?;

        let dt = geometry.frame_duration_us as c_int;
        let sr = geometry.sample_rate_hz as c_int;
        let size = unsafe { ffi::lc3_encoder_size(dt, sr) } as usize;
        if size == 0 {
            return Err(rejected(SessionKind::Encoder, &geometry));
        }

        // On any early return the block is dropped and freed.
        let mut block = StateBlock::allocate(size)?;
        let handle = unsafe { ffi::lc3_setup_encoder(dt, sr, 0, block.as_mut_ptr() as *mut c_void) };
        if handle.is_null() {
            return Err(rejected(SessionKind::Encoder, &geometry));
        }

        debug!(size, dt_us = dt, sr_hz = sr, "lc3 encoder ready");
        Ok(Self { handle, block, geometry })
    }

    /// Returns the size of the native state block.
    pub fn state_size(&self) -> usize {
        self.block.len()
    }

    /// Returns the frame geometry.
    pub fn geometry(&self) -> &FrameGeometry {
        &self.geometry
    }
}

impl FrameEncoder for Lc3Encoder {
    fn encode_frame(&mut self, pcm: &[i16], out: &mut [u8]) -> std::result::Result<(), FrameError> {
        if pcm.len() != self.geometry.samples_per_frame {
            return Err(FrameError::Length {
                expected: self.geometry.samples_per_frame,
                got: pcm.len(),
            });
        }
        if out.len() != self.geometry.frame_bytes {
            return Err(FrameError::Length {
                expected: self.geometry.frame_bytes,
                got: out.len(),
            });
        }

        let ret = unsafe {
            ffi::lc3_encode(
                self.handle,
                ffi::LC3_PCM_FORMAT_S16,
                pcm.as_ptr() as *const c_void,
                1,
                out.len() as c_int,
                out.as_mut_ptr() as *mut c_void,
            )
        };

        if ret != 0 {
            return Err(FrameError::Rejected(ret));
        }
        Ok(())
    }
}

/// LC3 decoder state in an owned memory block.
pub struct Lc3Decoder {
    // Points into `block`, which outlives it.
    handle: *mut Lc3DecoderHandle,
    block: StateBlock,
    geometry: FrameGeometry,
}

// Safety: The decoder state is only reached through &mut self.
unsafe impl Send for Lc3Decoder {}

impl Lc3Decoder {
    /// Allocates and sets up a decoder for `config`.
    pub fn new(config: &Config) -> Result<Self> {
        let geometry = config.geometry();
        check_geometry(SessionKind::Decoder, &geometry)?;

        let dt = geometry.frame_duration_us as c_int;
        let sr = geometry.sample_rate_hz as c_int;
        let size = unsafe { ffi::lc3_decoder_size(dt, sr) } as usize;
        if size == 0 {
            return Err(rejected(SessionKind::Decoder, &geometry));
        }

        let mut block = StateBlock::allocate(size)?;
        let handle = unsafe { ffi::lc3_setup_decoder(dt, sr, 0, block.as_mut_ptr() as *mut c_void) };
        if handle.is_null() {
            return Err(rejected(SessionKind::Decoder, &geometry));
        }

        debug!(size, dt_us = dt, sr_hz = sr, "lc3 decoder ready");
        Ok(Self { handle, block, geometry })
    }

    /// Returns the size of the native state block.
    pub fn state_size(&self) -> usize {
        self.block.len()
    }

    /// Returns the frame geometry.
    pub fn geometry(&self) -> &FrameGeometry {
        &self.geometry
    }
}

impl FrameDecoder for Lc3Decoder {
    fn decode_frame(
        &mut self,
        frame: &[u8],
        pcm: &mut [i16],
    ) -> std::result::Result<DecodeStatus, FrameError> {
        if pcm.len() < self.geometry.samples_per_frame {
            return Err(FrameError::Length {
                expected: self.geometry.samples_per_frame,
                got: pcm.len(),
            });
        }

        let ret = unsafe {
            ffi::lc3_decode(
                self.handle,
                frame.as_ptr() as *const c_void,
                frame.len() as c_int,
                ffi::LC3_PCM_FORMAT_S16,
                pcm.as_mut_ptr() as *mut c_void,
                1,
            )
        };

        match ret {
            ffi::LC3_DECODE_OK => Ok(DecodeStatus::Decoded),
            ffi::LC3_DECODE_PLC => Ok(DecodeStatus::Concealed),
            code => Err(FrameError::Rejected(code)),
        }
    }
}

/// Backend creating liblc3 sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lc3Backend;

impl Backend for Lc3Backend {
    type Encoder = Lc3Encoder;
    type Decoder = Lc3Decoder;

    fn new_encoder(&self, config: &Config) -> Result<Lc3Encoder> {
        Lc3Encoder::new(config)
    }

    fn new_decoder(&self, config: &Config) -> Result<Lc3Decoder> {
        Lc3Decoder::new(config)
    }
}
