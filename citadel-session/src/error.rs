//! Error types for session and participant lifecycle management.

use crate::types::{ParticipantId, ParticipantState, SessionId, SessionState};
use std::fmt;

#[derive(Debug)]
pub enum SessionError {
    SessionNotFound(SessionId),
    ParticipantNotFound(ParticipantId),
    DuplicateParticipant(ParticipantId),
    SessionFull { session: SessionId, max: usize },
    InvalidTransition { session: SessionId, from: SessionState, to: SessionState },
    InvalidParticipantTransition { participant: ParticipantId, from: ParticipantState, to: ParticipantState },
    NotAcceptingParticipants(SessionId),
    SecurityContextNotInitialized,
    EnvelopeError(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SessionNotFound(id) => write!(f, "session not found: {id}"),
            Self::ParticipantNotFound(id) => write!(f, "participant not found: {id}"),
            Self::DuplicateParticipant(id) => write!(f, "duplicate participant: {id}"),
            Self::SessionFull { session, max } => write!(f, "session {session} full (max {max})"),
            Self::InvalidTransition { session, from, to } => {
                write!(f, "invalid transition for {session}: {from} → {to}")
            }
            Self::InvalidParticipantTransition { participant, from, to } => {
                write!(f, "invalid transition for participant {participant}: {from} → {to}")
            }
            Self::NotAcceptingParticipants(id) => write!(f, "session {id} not accepting participants"),
            Self::SecurityContextNotInitialized => write!(f, "security context not initialized"),
            Self::EnvelopeError(msg) => write!(f, "envelope error: {msg}"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<citadel_envelope::CoreError> for SessionError {
    fn from(e: citadel_envelope::CoreError) -> Self {
        Self::EnvelopeError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
