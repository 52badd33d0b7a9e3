//! The Sensitive-Data Container: an ownership-tracked, zeroizing byte
//! segment that may bind child containers (certificates, ciphertexts,
//! shared secrets riding alongside their KEM ciphertext, and so on).

use std::sync::{Arc, Mutex};

use base64::Engine as _;
use rand_core::{OsRng, RngCore};
use zeroize::Zeroizing;

use crate::arena::{Arena, ArenaFactory, MemorySegment, RuntimeHint};
use crate::error::{CoreError, Result};

struct SdcInner {
    arena: Arena,
    segment: Mutex<MemorySegment>,
    bindings: Mutex<Vec<Sdc>>,
    from_data: Mutex<Option<Zeroizing<Vec<u8>>>>,
    segment_data: Mutex<Option<Zeroizing<Vec<u8>>>>,
}

/// A handle to a sensitive-data container. Cheap to clone (`Arc`); all
/// clones share the same arena, segment and bindings list.
#[derive(Clone)]
pub struct Sdc {
    inner: Arc<SdcInner>,
}

impl Sdc {
    /// A fresh segment of `size` zero bytes, owned by a new confined arena.
    pub fn new(size: usize) -> Result<Self> {
        Self::new_with_hint(size, RuntimeHint::Confined)
    }

    pub fn new_with_hint(size: usize, hint: RuntimeHint) -> Result<Self> {
        let arena = ArenaFactory::for_context(None, hint);
        let segment = arena.allocate(size)?;
        Ok(Self {
            inner: Arc::new(SdcInner {
                arena,
                segment: Mutex::new(segment),
                bindings: Mutex::new(Vec::new()),
                from_data: Mutex::new(None),
                segment_data: Mutex::new(None),
            }),
        })
    }

    /// A segment initialized from `bytes`. If `force_wipe` is set, `bytes`
    /// is zeroized in place immediately and ownership is not retained;
    /// otherwise the original buffer is kept as `from_data` and zeroized
    /// only at `close`.
    pub fn new_from(bytes: &mut [u8], force_wipe: bool) -> Result<Self> {
        let sdc = Self::new(bytes.len())?;
        {
            let mut seg = sdc.inner.segment.lock().unwrap();
            seg.as_mut_slice()?.copy_from_slice(bytes);
        }
        if force_wipe {
            crate::arena::secure_wipe(bytes);
        } else {
            *sdc.inner.from_data.lock().unwrap() = Some(Zeroizing::new(bytes.to_vec()));
        }
        Ok(sdc)
    }

    /// Build a container directly over caller-provided bytes without an
    /// intermediate arena allocation — used by strategies assembling a
    /// result from primitive output they already own.
    pub fn from_owned(bytes: Vec<u8>, hint: RuntimeHint) -> Result<Self> {
        let mut owned = bytes;
        let sdc = Self::new_with_hint(owned.len(), hint)?;
        {
            let mut seg = sdc.inner.segment.lock().unwrap();
            seg.as_mut_slice()?.copy_from_slice(&owned);
        }
        crate::arena::secure_wipe(&mut owned);
        Ok(sdc)
    }

    pub fn arena(&self) -> &Arena {
        &self.inner.arena
    }

    pub fn byte_size(&self) -> Result<usize> {
        Ok(self.inner.segment.lock().unwrap().len())
    }

    /// A read-only defensive copy of the underlying segment.
    pub fn as_byte_buffer(&self) -> Result<Vec<u8>> {
        let seg = self.inner.segment.lock().unwrap();
        Ok(seg.as_slice()?.to_vec())
    }

    /// Append an already-constructed child SDC.
    pub fn add_container_data(&self, child: Sdc) -> Result<()> {
        if !self.inner.arena.alive() {
            return Err(CoreError::AlreadyDisposed);
        }
        self.inner.bindings.lock().unwrap().push(child);
        Ok(())
    }

    /// Append a freshly allocated empty child of `size` bytes, returning it.
    pub fn add_container_sized(&self, size: usize) -> Result<Sdc> {
        if !self.inner.arena.alive() {
            return Err(CoreError::AlreadyDisposed);
        }
        let child = Sdc::new(size)?;
        self.inner.bindings.lock().unwrap().push(child.clone());
        Ok(child)
    }

    /// Append a child built from `bytes`. The bytes are zeroized even if
    /// the parent turns out to be closed (reject-but-wipe discipline).
    pub fn add_container_bytes(&self, bytes: &mut [u8], force_wipe: bool) -> Result<Sdc> {
        if !self.inner.arena.alive() {
            crate::arena::secure_wipe(bytes);
            return Err(CoreError::AlreadyDisposed);
        }
        let child = Sdc::new_from(bytes, force_wipe)?;
        self.inner.bindings.lock().unwrap().push(child.clone());
        Ok(child)
    }

    /// The i-th binding, if any.
    pub fn get(&self, index: usize) -> Option<Sdc> {
        self.inner.bindings.lock().unwrap().get(index).cloned()
    }

    pub fn binding_count(&self) -> usize {
        self.inner.bindings.lock().unwrap().len()
    }

    /// Copy segment bytes into a newly allocated heap buffer. Debugging /
    /// legacy escape hatch only — strategies should consume segments
    /// directly instead of exporting a second long-lived copy.
    #[deprecated(note = "debug/legacy only; strategies should consume segments directly")]
    pub fn export_data(&self) -> Result<()> {
        if !self.inner.arena.alive() {
            return Err(CoreError::AlreadyDisposed);
        }
        let seg = self.inner.segment.lock().unwrap();
        let copy = seg.as_slice()?.to_vec();
        *self.inner.segment_data.lock().unwrap() = Some(Zeroizing::new(copy));
        Ok(())
    }

    pub fn get_segment_data(&self) -> Option<Vec<u8>> {
        self.inner
            .segment_data
            .lock()
            .unwrap()
            .as_ref()
            .map(|v| v.to_vec())
    }

    pub fn get_segment_data_base64(&self) -> Option<String> {
        self.get_segment_data()
            .map(|bytes| base64::engine::general_purpose::STANDARD.encode(bytes))
    }

    pub fn zeroing_exported_data(&self) {
        if let Some(mut data) = self.inner.segment_data.lock().unwrap().take() {
            crate::arena::secure_wipe(&mut data);
        }
    }

    /// `n` cryptographically random bytes from the process CSPRNG.
    pub fn generate_safe_random_bytes(n: usize) -> Vec<u8> {
        let mut out = vec![0u8; n];
        OsRng.fill_bytes(&mut out);
        out
    }

    /// Close this container: snapshot and close bindings in reverse
    /// insertion order, catch late arrivals, then wipe. Never fails
    /// visibly — all errors are logged and swallowed.
    pub fn close(&self) {
        if !self.inner.arena.alive() {
            tracing::debug!("sdc close on already-closed arena, ignoring");
            return;
        }

        let snapshot: Vec<Sdc> = {
            let mut bindings = self.inner.bindings.lock().unwrap();
            std::mem::take(&mut *bindings)
        };

        for child in snapshot.into_iter().rev() {
            child.close();
        }

        let late_arrivals: Vec<Sdc> = {
            let mut bindings = self.inner.bindings.lock().unwrap();
            std::mem::take(&mut *bindings)
        };
        for child in late_arrivals.into_iter().rev() {
            child.close();
        }

        if self.inner.arena.alive() {
            {
                let mut seg = self.inner.segment.lock().unwrap();
                seg.wipe();
            }
            if let Some(mut from_data) = self.inner.from_data.lock().unwrap().take() {
                crate::arena::secure_wipe(&mut from_data);
            }
            self.zeroing_exported_data();
            self.inner.arena.close();
            tracing::trace!("sdc closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_wipes_segment() {
        let sdc = Sdc::new(16).unwrap();
        {
            let buf = sdc.as_byte_buffer().unwrap();
            assert_eq!(buf.len(), 16);
        }
        sdc.close();
        assert!(!sdc.arena().alive());
    }

    #[test]
    fn close_zeroizes_from_data() {
        let mut src = vec![0xAAu8; 8];
        let sdc = Sdc::new_from(&mut src, false).unwrap();
        sdc.close();
        assert!(!sdc.arena().alive());
    }

    #[test]
    fn force_wipe_zeroizes_source_immediately() {
        let mut src = vec![0xAAu8; 8];
        let _sdc = Sdc::new_from(&mut src, true).unwrap();
        assert_eq!(src, vec![0u8; 8]);
    }

    #[test]
    fn closing_already_closed_is_idempotent() {
        let sdc = Sdc::new(4).unwrap();
        sdc.close();
        sdc.close();
    }

    #[test]
    fn close_closes_all_bindings() {
        let parent = Sdc::new(4).unwrap();
        let child_a = parent.add_container_sized(4).unwrap();
        let child_b = parent.add_container_sized(4).unwrap();

        assert_eq!(parent.binding_count(), 2);
        parent.close();
        assert!(!child_a.arena().alive());
        assert!(!child_b.arena().alive());
    }

    #[test]
    fn add_container_rejects_on_closed_parent_but_wipes_bytes() {
        let parent = Sdc::new(4).unwrap();
        parent.close();
        let mut bytes = vec![0x42u8; 4];
        let result = parent.add_container_bytes(&mut bytes, false);
        assert!(result.is_err());
        assert_eq!(bytes, vec![0u8; 4]);
    }

    #[test]
    fn reentrant_close_does_not_deadlock() {
        // Closing a parent whose child list is mutated concurrently from
        // another thread (simulating a child's close reaching back in)
        // must still terminate.
        let parent = Sdc::new(4).unwrap();
        let _child = parent.add_container_sized(4).unwrap();
        let parent2 = parent.clone();
        let handle = std::thread::spawn(move || {
            parent2.close();
        });
        parent.close();
        handle.join().unwrap();
    }
}
