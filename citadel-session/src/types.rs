//! Core types: SessionId, ParticipantId, Role, SessionState.

use rand_core::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique session identifier (hex-encoded random bytes).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        let mut bytes = [0u8; 16];
        rand_core::OsRng.fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique participant identifier, scoped to the session that created it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn generate() -> Self {
        let mut bytes = [0u8; 16];
        rand_core::OsRng.fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A participant's part in a session. `Initiator`/`Responder` describe which
/// side of the handshake a participant played; `Observer` is a non-handshake
/// participant admitted read-only (e.g. for audit or relay); `Custom` carries
/// an application-defined label for roles this crate doesn't otherwise name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Initiator,
    Responder,
    Observer,
    Custom(String),
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Initiator => write!(f, "INITIATOR"),
            Role::Responder => write!(f, "RESPONDER"),
            Role::Observer => write!(f, "OBSERVER"),
            Role::Custom(label) => write!(f, "CUSTOM({label})"),
        }
    }
}

/// Participant connection state, driven by the transport's handshake state
/// machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticipantState {
    Connecting,
    Handshaking,
    Established,
    Closing,
    Closed,
}

impl ParticipantState {
    pub fn valid_transitions(&self) -> &[ParticipantState] {
        match self {
            ParticipantState::Connecting => &[ParticipantState::Handshaking, ParticipantState::Closing],
            ParticipantState::Handshaking => &[ParticipantState::Established, ParticipantState::Closing],
            ParticipantState::Established => &[ParticipantState::Closing],
            ParticipantState::Closing => &[ParticipantState::Closed],
            ParticipantState::Closed => &[],
        }
    }

    pub fn can_transition_to(&self, target: ParticipantState) -> bool {
        self.valid_transitions().contains(&target)
    }
}

impl fmt::Display for ParticipantState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParticipantState::Connecting => write!(f, "CONNECTING"),
            ParticipantState::Handshaking => write!(f, "HANDSHAKING"),
            ParticipantState::Established => write!(f, "ESTABLISHED"),
            ParticipantState::Closing => write!(f, "CLOSING"),
            ParticipantState::Closed => write!(f, "CLOSED"),
        }
    }
}

/// Session lifecycle state.
///
/// ```text
/// CREATED → ACTIVE ↔ SUSPENDED
///             │
///             └──→ CLOSING → CLOSED
///                              │
///                              └──→ TERMINATED (unconditional, any state)
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Created,
    Active,
    Suspended,
    Closing,
    Closed,
    Terminated,
}

impl SessionState {
    /// Whether participants may be added while in this state.
    pub fn accepts_participants(&self) -> bool {
        matches!(self, SessionState::Created | SessionState::Active)
    }

    pub fn valid_transitions(&self) -> &[SessionState] {
        match self {
            SessionState::Created => &[SessionState::Active, SessionState::Terminated],
            SessionState::Active => &[SessionState::Suspended, SessionState::Closing, SessionState::Terminated],
            SessionState::Suspended => &[SessionState::Active, SessionState::Closing, SessionState::Terminated],
            SessionState::Closing => &[SessionState::Closed, SessionState::Terminated],
            SessionState::Closed => &[SessionState::Terminated],
            SessionState::Terminated => &[],
        }
    }

    pub fn can_transition_to(&self, target: SessionState) -> bool {
        self.valid_transitions().contains(&target)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Created => write!(f, "CREATED"),
            SessionState::Active => write!(f, "ACTIVE"),
            SessionState::Suspended => write!(f, "SUSPENDED"),
            SessionState::Closing => write!(f, "CLOSING"),
            SessionState::Closed => write!(f, "CLOSED"),
            SessionState::Terminated => write!(f, "TERMINATED"),
        }
    }
}

/// Configuration a session is created with.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// 0 means unlimited.
    pub max_participants: usize,
    /// Key rotation interval; 0 disables automatic rotation.
    pub key_rotation_interval: std::time::Duration,
    pub session_timeout: std::time::Duration,
    pub idle_timeout: std::time::Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_participants: 0,
            key_rotation_interval: std::time::Duration::from_secs(3600),
            session_timeout: std::time::Duration::from_secs(24 * 3600),
            idle_timeout: std::time::Duration::from_secs(15 * 60),
        }
    }
}
