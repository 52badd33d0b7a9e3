//! A single connected peer within a session, and the per-participant
//! security context that guards its AEAD sequence counters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, RwLock};

use citadel_envelope::sdc::Sdc;
use citadel_envelope::strategy::calculate_nonce;

use crate::error::{Result, SessionError};
use crate::types::{ParticipantId, ParticipantState, Role};

/// Per-participant AEAD key material and monotonic sequence counters.
///
/// `write_sequence`/`read_sequence` are the inputs to
/// `citadel_envelope::strategy::calculate_nonce`, which XORs them into the
/// base IV for each record — they must never repeat for the life of
/// `session_key`.
pub struct ParticipantSecurityContext {
    session_key: RwLock<Option<Sdc>>,
    base_iv: [u8; 12],
    write_sequence: AtomicU64,
    read_sequence: AtomicU64,
    /// The cipher/KEM identifier the handshake negotiated, e.g.
    /// `"Hybrid-X25519-ML-KEM-768"` — recorded for audit and for callers
    /// that need to pick a matching data-phase strategy.
    negotiated_strategy: RwLock<Option<String>>,
    /// The peer's raw public key from the handshake, kept alongside the
    /// derived session key for re-verification or certificate binding.
    peer_public_key: Mutex<Option<Sdc>>,
}

impl ParticipantSecurityContext {
    pub fn new(session_key: Sdc, base_iv: [u8; 12]) -> Self {
        Self {
            session_key: RwLock::new(Some(session_key)),
            base_iv,
            write_sequence: AtomicU64::new(0),
            read_sequence: AtomicU64::new(0),
            negotiated_strategy: RwLock::new(None),
            peer_public_key: Mutex::new(None),
        }
    }

    pub fn with_negotiated_strategy(self, strategy: impl Into<String>) -> Self {
        *self.negotiated_strategy.write().unwrap() = Some(strategy.into());
        self
    }

    pub fn with_peer_public_key(self, peer_public_key: Sdc) -> Self {
        *self.peer_public_key.lock().unwrap() = Some(peer_public_key);
        self
    }

    pub fn negotiated_strategy(&self) -> Option<String> {
        self.negotiated_strategy.read().unwrap().clone()
    }

    pub fn peer_public_key(&self) -> Option<Sdc> {
        self.peer_public_key.lock().unwrap().clone()
    }

    pub fn is_established(&self) -> bool {
        self.session_key.read().unwrap().is_some()
    }

    /// Fetch-and-increment the write sequence, returning the nonce for the
    /// record about to be sent.
    pub fn next_write_nonce(&self) -> Result<Vec<u8>> {
        let sequence = self.write_sequence.fetch_add(1, Ordering::SeqCst);
        Ok(calculate_nonce(&self.base_iv, sequence)?)
    }

    /// Fetch-and-increment the read sequence, returning the nonce expected
    /// for the next inbound record.
    pub fn next_read_nonce(&self) -> Result<Vec<u8>> {
        let sequence = self.read_sequence.fetch_add(1, Ordering::SeqCst);
        Ok(calculate_nonce(&self.base_iv, sequence)?)
    }

    pub fn with_key<R>(&self, f: impl FnOnce(&Sdc) -> Result<R>) -> Result<R> {
        let guard = self.session_key.read().unwrap();
        let key = guard.as_ref().ok_or(SessionError::EnvelopeError("session key cleared".into()))?;
        f(key)
    }

    /// Closes and drops the session key and peer public key; idempotent.
    pub fn clear(&self) {
        if let Some(key) = self.session_key.write().unwrap().take() {
            key.close();
        }
        if let Some(peer_key) = self.peer_public_key.lock().unwrap().take() {
            peer_key.close();
        }
    }
}

impl Drop for ParticipantSecurityContext {
    fn drop(&mut self) {
        self.clear();
    }
}

/// A peer connected to a session: its role, connection state, and (once the
/// handshake completes) its negotiated security context.
pub struct Participant {
    id: ParticipantId,
    role: Role,
    state: RwLock<ParticipantState>,
    security: RwLock<Option<ParticipantSecurityContext>>,
}

impl Participant {
    pub fn new(role: Role) -> Self {
        Self {
            id: ParticipantId::generate(),
            role,
            state: RwLock::new(ParticipantState::Connecting),
            security: RwLock::new(None),
        }
    }

    pub fn id(&self) -> &ParticipantId {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role.clone()
    }

    pub fn state(&self) -> ParticipantState {
        *self.state.read().unwrap()
    }

    /// Transition to `target`, rejecting moves the state machine forbids.
    pub fn transition_to(&self, target: ParticipantState) -> Result<()> {
        let mut guard = self.state.write().unwrap();
        if !guard.can_transition_to(target) {
            return Err(SessionError::InvalidParticipantTransition {
                participant: self.id.clone(),
                from: *guard,
                to: target,
            });
        }
        *guard = target;
        Ok(())
    }

    pub fn establish(&self, session_key: Sdc, base_iv: [u8; 12]) -> Result<()> {
        self.establish_with(session_key, base_iv, None, None)
    }

    /// Like [`establish`](Self::establish), additionally recording the
    /// negotiated strategy identifier and the peer's raw public key.
    pub fn establish_with(
        &self,
        session_key: Sdc,
        base_iv: [u8; 12],
        negotiated_strategy: Option<String>,
        peer_public_key: Option<Sdc>,
    ) -> Result<()> {
        if self.state() == ParticipantState::Connecting {
            self.transition_to(ParticipantState::Handshaking)?;
        }
        self.transition_to(ParticipantState::Established)?;
        let mut ctx = ParticipantSecurityContext::new(session_key, base_iv);
        if let Some(strategy) = negotiated_strategy {
            ctx = ctx.with_negotiated_strategy(strategy);
        }
        if let Some(peer_key) = peer_public_key {
            ctx = ctx.with_peer_public_key(peer_key);
        }
        *self.security.write().unwrap() = Some(ctx);
        Ok(())
    }

    pub fn security(&self) -> std::sync::RwLockReadGuard<'_, Option<ParticipantSecurityContext>> {
        self.security.read().unwrap()
    }

    /// Idempotent close: clears the security context and marks CLOSED.
    pub fn close(&self) {
        if let Some(ctx) = self.security.write().unwrap().take() {
            ctx.clear();
        }
        *self.state.write().unwrap() = ParticipantState::Closed;
    }
}
