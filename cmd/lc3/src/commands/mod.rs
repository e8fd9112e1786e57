//! CLI commands module.

mod info;
mod transcode;
mod util;

pub use info::InfoCommand;
pub use transcode::{DecodeCommand, EncodeCommand, RoundtripCommand};

pub(crate) use util::*;
