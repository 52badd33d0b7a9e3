//! Session: the participant map, role index, and security-context
//! lifecycle for a single negotiated channel group.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use citadel_envelope::catalog::{KemType, SignatureType};
use citadel_envelope::sdc::Sdc;

use crate::error::{Result, SessionError};
use crate::types::{ParticipantId, Role, SessionConfig, SessionId, SessionState};
use crate::participant::Participant;

struct SessionInner {
    participants: HashMap<ParticipantId, Arc<Participant>>,
    by_role: HashMap<Role, HashSet<ParticipantId>>,
}

/// Negotiated algorithm choices plus the master secret a session's
/// participants derive their per-participant keys from.
pub struct SessionSecurityContext {
    inner: RwLock<Option<SecurityContextInner>>,
}

struct SecurityContextInner {
    master: Sdc,
    salt: Option<Sdc>,
    kem: KemType,
    signature: SignatureType,
    use_classic_ecdh: bool,
    last_rotation_at: std::time::Instant,
}

impl SessionSecurityContext {
    pub fn new() -> Self {
        Self { inner: RwLock::new(None) }
    }

    /// Idempotent only until [`Self::clear`] is called: a second call after
    /// clearing (or while already initialized) is rejected.
    pub fn initialize(
        &self,
        master: Sdc,
        salt: Option<Sdc>,
        kem: KemType,
        signature: SignatureType,
        use_classic_ecdh: bool,
    ) -> Result<()> {
        let mut guard = self.inner.write().unwrap();
        if guard.is_some() {
            return Ok(());
        }
        *guard = Some(SecurityContextInner {
            master,
            salt,
            kem,
            signature,
            use_classic_ecdh,
            last_rotation_at: std::time::Instant::now(),
        });
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.read().unwrap().is_some()
    }

    /// Atomically swaps in new master/salt material, closing the old
    /// handles. Fails if the context was never initialized.
    pub fn rotate_key(&self, new_master: Sdc, new_salt: Option<Sdc>) -> Result<()> {
        let mut guard = self.inner.write().unwrap();
        let ctx = guard.as_mut().ok_or(SessionError::SecurityContextNotInitialized)?;
        let old_master = std::mem::replace(&mut ctx.master, new_master);
        let old_salt = std::mem::replace(&mut ctx.salt, new_salt);
        old_master.close();
        if let Some(salt) = old_salt {
            salt.close();
        }
        ctx.last_rotation_at = std::time::Instant::now();
        Ok(())
    }

    pub fn needs_key_rotation(&self, interval: std::time::Duration) -> bool {
        if interval.is_zero() {
            return false;
        }
        match self.inner.read().unwrap().as_ref() {
            Some(ctx) => ctx.last_rotation_at.elapsed() >= interval,
            None => false,
        }
    }

    /// Closes the master/salt material and marks the context cleared.
    pub fn clear(&self) {
        if let Some(ctx) = self.inner.write().unwrap().take() {
            ctx.master.close();
            if let Some(salt) = ctx.salt {
                salt.close();
            }
        }
    }
}

impl Default for SessionSecurityContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Callbacks a session fires on lifecycle events. Implementations receive a
/// snapshot copy, never a live reference into the session's internal maps.
pub trait SessionListener: Send + Sync {
    fn on_participant_joined(&self, _session: &SessionId, _participant: &ParticipantId) {}
    fn on_participant_left(&self, _session: &SessionId, _participant: &ParticipantId) {}
    fn on_session_state_changed(&self, _session: &SessionId, _from: SessionState, _to: SessionState) {}
}

pub struct Session {
    id: SessionId,
    config: SessionConfig,
    state: RwLock<SessionState>,
    inner: RwLock<SessionInner>,
    security: SessionSecurityContext,
    listeners: RwLock<Vec<Arc<dyn SessionListener>>>,
}

impl Session {
    pub fn create(id: Option<SessionId>, config: SessionConfig) -> Arc<Self> {
        Arc::new(Self {
            id: id.unwrap_or_else(SessionId::generate),
            config,
            state: RwLock::new(SessionState::Created),
            inner: RwLock::new(SessionInner { participants: HashMap::new(), by_role: HashMap::new() }),
            security: SessionSecurityContext::new(),
            listeners: RwLock::new(Vec::new()),
        })
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn state(&self) -> SessionState {
        *self.state.read().unwrap()
    }

    pub fn security(&self) -> &SessionSecurityContext {
        &self.security
    }

    pub fn add_listener(&self, listener: Arc<dyn SessionListener>) {
        self.listeners.write().unwrap().push(listener);
    }

    fn listener_snapshot(&self) -> Vec<Arc<dyn SessionListener>> {
        self.listeners.read().unwrap().clone()
    }

    pub fn add_participant(&self, participant: Arc<Participant>) -> Result<()> {
        let state = self.state();
        if !state.accepts_participants() {
            return Err(SessionError::NotAcceptingParticipants(self.id.clone()));
        }

        let id = participant.id().clone();
        {
            let mut guard = self.inner.write().unwrap();
            if guard.participants.contains_key(&id) {
                return Err(SessionError::DuplicateParticipant(id));
            }
            if self.config.max_participants > 0 && guard.participants.len() >= self.config.max_participants {
                return Err(SessionError::SessionFull { session: self.id.clone(), max: self.config.max_participants });
            }
            guard.by_role.entry(participant.role()).or_default().insert(id.clone());
            guard.participants.insert(id.clone(), participant);
        }

        for listener in self.listener_snapshot() {
            listener.on_participant_joined(&self.id, &id);
        }
        Ok(())
    }

    pub fn remove_participant(&self, id: &ParticipantId) -> Result<Arc<Participant>> {
        let removed = {
            let mut guard = self.inner.write().unwrap();
            let participant = guard.participants.remove(id).ok_or_else(|| SessionError::ParticipantNotFound(id.clone()))?;
            if let Some(set) = guard.by_role.get_mut(&participant.role()) {
                set.remove(id);
            }
            participant
        };

        for listener in self.listener_snapshot() {
            listener.on_participant_left(&self.id, id);
        }
        Ok(removed)
    }

    pub fn get_participant(&self, id: &ParticipantId) -> Option<Arc<Participant>> {
        self.inner.read().unwrap().participants.get(id).cloned()
    }

    pub fn get_participants_by_role(&self, role: &Role) -> Vec<Arc<Participant>> {
        let guard = self.inner.read().unwrap();
        guard
            .by_role
            .get(role)
            .map(|ids| ids.iter().filter_map(|id| guard.participants.get(id).cloned()).collect())
            .unwrap_or_default()
    }

    pub fn find_participants(&self, predicate: impl Fn(&Participant) -> bool) -> Vec<Arc<Participant>> {
        self.inner.read().unwrap().participants.values().filter(|p| predicate(p)).cloned().collect()
    }

    pub fn participant_count(&self) -> usize {
        self.inner.read().unwrap().participants.len()
    }

    fn transition(&self, target: SessionState) -> Result<()> {
        let mut guard = self.state.write().unwrap();
        if !guard.can_transition_to(target) {
            return Err(SessionError::InvalidTransition { session: self.id.clone(), from: *guard, to: target });
        }
        let from = *guard;
        *guard = target;
        drop(guard);
        for listener in self.listener_snapshot() {
            listener.on_session_state_changed(&self.id, from, target);
        }
        Ok(())
    }

    pub fn activate(&self) -> Result<()> {
        self.transition(SessionState::Active)
    }

    pub fn suspend(&self) -> Result<()> {
        self.transition(SessionState::Suspended)
    }

    /// Snapshot/release/close-children pattern: release the write lock
    /// before closing participants to avoid a participant's own close path
    /// reentering this session.
    pub fn close(&self) -> Result<()> {
        if self.state() == SessionState::Closed {
            return Ok(());
        }
        self.transition(SessionState::Closing)?;

        let snapshot: Vec<Arc<Participant>> = {
            let mut guard = self.inner.write().unwrap();
            let participants = std::mem::take(&mut guard.participants).into_values().collect();
            guard.by_role.clear();
            participants
        };
        for participant in snapshot {
            participant.close();
        }
        self.security.clear();

        self.transition(SessionState::Closed)
    }

    /// Unconditional path: clears indexes and the security context
    /// regardless of the current state, without going through the normal
    /// transition guard.
    pub fn terminate(&self) {
        let snapshot: Vec<Arc<Participant>> = {
            let mut guard = self.inner.write().unwrap();
            let participants = std::mem::take(&mut guard.participants).into_values().collect();
            guard.by_role.clear();
            participants
        };
        for participant in snapshot {
            participant.close();
        }
        self.security.clear();
        let from = *self.state.read().unwrap();
        *self.state.write().unwrap() = SessionState::Terminated;
        for listener in self.listener_snapshot() {
            listener.on_session_state_changed(&self.id, from, SessionState::Terminated);
        }
    }
}
