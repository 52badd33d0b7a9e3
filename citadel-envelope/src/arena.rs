//! Scoped memory arenas backing every `Sdc` segment.
//!
//! There is no off-heap FFI memory here — segments are ordinary heap
//! allocations — but the ownership discipline (confined vs. shared,
//! alive/closed, single wipe) mirrors a real off-heap allocator closely
//! enough that the container layer above never has to know the difference.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::ThreadId;

use crate::error::{CoreError, Result};

/// Whether an arena may be touched from one thread only or from any thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Single-thread ownership, checked against the creating thread.
    Confined,
    /// Any thread may allocate from or close this arena.
    Shared,
}

/// Hint passed by the caller about the runtime it's operating in, since
/// Rust has no reflection to detect "an async server framework is present"
/// the way the original heuristic did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeHint {
    Confined,
    AsyncServer,
}

struct ArenaInner {
    alive: AtomicBool,
    mode: Mode,
    owner: Option<ThreadId>,
}

/// A scoped memory region. Clone is cheap (`Arc`); all clones refer to the
/// same underlying liveness flag.
#[derive(Clone)]
pub struct Arena {
    inner: Arc<ArenaInner>,
}

impl Arena {
    fn new(mode: Mode) -> Self {
        let owner = match mode {
            Mode::Confined => Some(std::thread::current().id()),
            Mode::Shared => None,
        };
        Self {
            inner: Arc::new(ArenaInner {
                alive: AtomicBool::new(true),
                mode,
                owner,
            }),
        }
    }

    pub fn mode(&self) -> Mode {
        self.inner.mode
    }

    pub fn alive(&self) -> bool {
        self.inner.alive.load(Ordering::Acquire)
    }

    fn check_thread(&self) -> Result<()> {
        if self.inner.mode == Mode::Confined {
            if let Some(owner) = self.inner.owner {
                if owner != std::thread::current().id() {
                    return Err(CoreError::WrongThreadAccess);
                }
            }
        }
        Ok(())
    }

    /// Allocate a zero-initialized segment of `len` bytes from this arena.
    pub fn allocate(&self, len: usize) -> Result<MemorySegment> {
        self.check_thread()?;
        if !self.alive() {
            return Err(CoreError::AlreadyDisposed);
        }
        Ok(MemorySegment {
            arena: self.clone(),
            bytes: vec![0u8; len].into_boxed_slice(),
        })
    }

    /// Invalidate the arena. Idempotent: closing twice is a no-op.
    pub fn close(&self) {
        self.inner.alive.store(false, Ordering::Release);
    }
}

/// A contiguous buffer tied to one arena's lifetime.
pub struct MemorySegment {
    arena: Arena,
    bytes: Box<[u8]>,
}

impl MemorySegment {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Read access, valid only while the owning arena is alive.
    pub fn as_slice(&self) -> Result<&[u8]> {
        self.arena.check_thread()?;
        if !self.arena.alive() {
            return Err(CoreError::AlreadyDisposed);
        }
        Ok(&self.bytes)
    }

    pub fn as_mut_slice(&mut self) -> Result<&mut [u8]> {
        self.arena.check_thread()?;
        if !self.arena.alive() {
            return Err(CoreError::AlreadyDisposed);
        }
        Ok(&mut self.bytes)
    }

    /// Overwrite the segment with zeros. Called exactly once per SDC close.
    pub fn wipe(&mut self) {
        secure_wipe(&mut self.bytes);
    }
}

/// The single native-style wipe routine. Both the default build and the
/// `native-backend`'s `entanglement_secure_wipe` shim call through here so
/// there is exactly one wipe code path regardless of feature flags.
pub fn secure_wipe(buf: &mut [u8]) {
    use zeroize::Zeroize;
    buf.zeroize();
}

/// Selects an arena's mode the way the source's heuristic factory did,
/// minus the reflection: an explicit override always wins, otherwise the
/// caller's declared runtime hint decides.
pub struct ArenaFactory;

impl ArenaFactory {
    pub fn for_context(override_mode: Option<Mode>, hint: RuntimeHint) -> Arena {
        let mode = override_mode.unwrap_or(match hint {
            RuntimeHint::AsyncServer => Mode::Shared,
            RuntimeHint::Confined => Mode::Confined,
        });
        Arena::new(mode)
    }

    pub fn confined() -> Arena {
        Arena::new(Mode::Confined)
    }

    pub fn shared() -> Arena {
        Arena::new(Mode::Shared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_is_zeroed() {
        let arena = ArenaFactory::confined();
        let seg = arena.allocate(32).unwrap();
        assert_eq!(seg.as_slice().unwrap(), &[0u8; 32][..]);
    }

    #[test]
    fn close_invalidates_segments() {
        let arena = ArenaFactory::confined();
        let seg = arena.allocate(8).unwrap();
        arena.close();
        assert!(seg.as_slice().is_err());
    }

    #[test]
    fn close_is_idempotent() {
        let arena = ArenaFactory::confined();
        arena.close();
        arena.close();
        assert!(!arena.alive());
    }

    #[test]
    fn heuristic_prefers_override() {
        let arena = ArenaFactory::for_context(Some(Mode::Confined), RuntimeHint::AsyncServer);
        assert_eq!(arena.mode(), Mode::Confined);
    }

    #[test]
    fn heuristic_upgrades_to_shared_for_async_server() {
        let arena = ArenaFactory::for_context(None, RuntimeHint::AsyncServer);
        assert_eq!(arena.mode(), Mode::Shared);
    }
}
