use thiserror::Error;

use crate::session::SessionKind;

/// Session-level errors returned by the LC3 bridge.
#[derive(Debug, Error)]
pub enum Lc3Error {
    #[error("lc3: out of memory allocating {size} byte state block")]
    OutOfMemory { size: usize },

    #[error("lc3: {kind} setup rejected ({frame_duration_us}us @ {sample_rate_hz}Hz)")]
    SetupRejected {
        kind: SessionKind,
        frame_duration_us: u32,
        sample_rate_hz: u32,
    },

    #[error("lc3: invalid config: {0}")]
    InvalidConfig(String),

    #[error("lc3: unknown handle {0}")]
    UnknownHandle(u64),

    #[error("lc3: handle {handle} is a {actual} session, expected {expected}")]
    WrongKind {
        handle: u64,
        expected: SessionKind,
        actual: SessionKind,
    },

    #[error("lc3: config: {0}")]
    Config(String),

    #[error("lc3: io: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Lc3Error>;

/// Failure of a single frame encode or decode.
///
/// Never surfaced for a whole buffer; the assembler replaces the frame with
/// its fallback payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("lc3: frame rejected by codec (status {0})")]
    Rejected(i32),

    #[error("lc3: frame length mismatch: expected {expected}, got {got}")]
    Length { expected: usize, got: usize },
}
