//! Handle table for long-lived codec sessions.
//!
//! Callers outside Rust ownership (RPC layers, audio threads) refer to
//! sessions by integer token. The table owns every session; a token stays
//! valid from `create_*` until `release`. Each session sits behind its own
//! mutex, so calls on one handle are serialised while different handles
//! run in parallel.

use std::collections::HashMap;
use std::num::NonZeroU64;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::codec::Backend;
use crate::config::Config;
use crate::error::{Lc3Error, Result};
use crate::frame::FrameGeometry;
use crate::session::{DecoderSession, EncoderSession, SessionKind};
use crate::transcode::FrameStats;

/// Token identifying a live session. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(NonZeroU64);

impl Handle {
    /// Converts a raw token; zero is not a handle.
    pub fn from_raw(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }

    /// Returns the raw token.
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl std::fmt::Display for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

enum Slot<B: Backend> {
    Encoder(Arc<Mutex<EncoderSession<B::Encoder>>>),
    Decoder(Arc<Mutex<DecoderSession<B::Decoder>>>),
}

impl<B: Backend> Slot<B> {
    fn kind(&self) -> SessionKind {
        match self {
            Self::Encoder(_) => SessionKind::Encoder,
            Self::Decoder(_) => SessionKind::Decoder,
        }
    }
}

/// Owns the sessions created through one backend and configuration.
pub struct HandleTable<B: Backend> {
    backend: B,
    config: Config,
    next: AtomicU64,
    slots: RwLock<HashMap<u64, Slot<B>>>,
}

impl<B: Backend> HandleTable<B> {
    /// Creates an empty table. The configuration is validated once here
    /// and applies to every session.
    pub fn new(backend: B, config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(backend, config))
    }

    pub(crate) fn with_valid_config(backend: B, config: Config) -> Self {
        Self {
            backend,
            config,
            next: AtomicU64::new(1),
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the backend sessions are created with.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the session configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the frame geometry of every session in the table.
    pub fn geometry(&self) -> FrameGeometry {
        self.config.geometry()
    }

    /// Creates an encoder session.
    pub fn create_encoder(&self) -> Result<Handle> {
        let session = EncoderSession::open(&self.backend, &self.config)?;
        Ok(self.insert(Slot::Encoder(Arc::new(Mutex::new(session)))))
    }

    /// Creates a decoder session.
    pub fn create_decoder(&self) -> Result<Handle> {
        let session = DecoderSession::open(&self.backend, &self.config)?;
        Ok(self.insert(Slot::Decoder(Arc::new(Mutex::new(session)))))
    }

    fn insert(&self, slot: Slot<B>) -> Handle {
        let raw = self.next.fetch_add(1, Ordering::Relaxed);
        let kind = slot.kind();
        self.slots.write().insert(raw, slot);
        debug!(handle = raw, %kind, "lc3 session created");
        // The counter starts at 1 and a u64 does not wrap in practice.
        Handle(NonZeroU64::new(raw).unwrap_or(NonZeroU64::MIN))
    }

    /// Releases a session of any kind, returning its kind, or `None` when
    /// the handle is not live.
    ///
    /// A call still running on the session finishes first; its state is
    /// freed when that call returns.
    pub fn release(&self, handle: Handle) -> Option<SessionKind> {
        let slot = self.slots.write().remove(&handle.get());
        match slot {
            Some(slot) => {
                let kind = slot.kind();
                debug!(%handle, %kind, "lc3 session released");
                Some(kind)
            }
            None => {
                warn!(%handle, "lc3 release of unknown handle");
                None
            }
        }
    }

    /// Releases `handle` only if it is a session of `kind`.
    pub fn release_kind(&self, handle: Handle, kind: SessionKind) -> Result<()> {
        let mut slots = self.slots.write();
        let actual = slots
            .get(&handle.get())
            .map(Slot::kind)
            .ok_or(Lc3Error::UnknownHandle(handle.get()))?;
        if actual != kind {
            return Err(Lc3Error::WrongKind {
                handle: handle.get(),
                expected: kind,
                actual,
            });
        }
        slots.remove(&handle.get());
        drop(slots);
        debug!(%handle, %kind, "lc3 session released");
        Ok(())
    }

    /// Encodes `pcm` with the encoder session `handle`.
    pub fn encode(&self, handle: Handle, pcm: &[u8]) -> Result<Vec<u8>> {
        let session = self.encoder(handle)?;
        let mut session = session.lock();
        Ok(session.encode(pcm))
    }

    /// Decodes `data` with the decoder session `handle`.
    pub fn decode(&self, handle: Handle, data: &[u8]) -> Result<Vec<u8>> {
        let session = self.decoder(handle)?;
        let mut session = session.lock();
        Ok(session.decode(data))
    }

    /// Returns the kind of a live session.
    pub fn kind(&self, handle: Handle) -> Option<SessionKind> {
        self.slots.read().get(&handle.get()).map(Slot::kind)
    }

    /// Returns the frame statistics of a live session.
    pub fn stats(&self, handle: Handle) -> Result<FrameStats> {
        let stats = match self.lookup(handle)? {
            Slot::Encoder(s) => s.lock().stats(),
            Slot::Decoder(s) => s.lock().stats(),
        };
        Ok(stats)
    }

    /// Returns the number of live sessions.
    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    /// Returns true if no session is live.
    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }

    // Clones the slot's Arc so the table lock is not held during codec work.
    fn lookup(&self, handle: Handle) -> Result<Slot<B>> {
        let slots = self.slots.read();
        match slots.get(&handle.get()) {
            Some(Slot::Encoder(s)) => Ok(Slot::Encoder(Arc::clone(s))),
            Some(Slot::Decoder(s)) => Ok(Slot::Decoder(Arc::clone(s))),
            None => Err(Lc3Error::UnknownHandle(handle.get())),
        }
    }

    fn encoder(&self, handle: Handle) -> Result<Arc<Mutex<EncoderSession<B::Encoder>>>> {
        match self.lookup(handle)? {
            Slot::Encoder(s) => Ok(s),
            Slot::Decoder(_) => Err(Lc3Error::WrongKind {
                handle: handle.get(),
                expected: SessionKind::Encoder,
                actual: SessionKind::Decoder,
            }),
        }
    }

    fn decoder(&self, handle: Handle) -> Result<Arc<Mutex<DecoderSession<B::Decoder>>>> {
        match self.lookup(handle)? {
            Slot::Decoder(s) => Ok(s),
            Slot::Encoder(_) => Err(Lc3Error::WrongKind {
                handle: handle.get(),
                expected: SessionKind::Decoder,
                actual: SessionKind::Encoder,
            }),
        }
    }
}
