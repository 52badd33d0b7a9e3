//! Audit logging: every session/participant lifecycle event emits a
//! structured record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::types::{ParticipantId, Role, SessionId, SessionState};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum AuditAction {
    SessionCreated,
    SessionStateChanged { from: String, to: String },
    ParticipantJoined { role: String },
    ParticipantLeft,
    KeyRotated,
    HandshakeCompleted,
    HandshakeFailed { reason: String },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuditEvent {
    pub timestamp: DateTime<Utc>,
    pub session_id: Option<SessionId>,
    pub participant_id: Option<ParticipantId>,
    pub action: AuditAction,
    pub success: bool,
    pub detail: Option<String>,
}

impl AuditEvent {
    pub fn session_event(session_id: &SessionId, action: AuditAction) -> Self {
        Self {
            timestamp: Utc::now(),
            session_id: Some(session_id.clone()),
            participant_id: None,
            action,
            success: true,
            detail: None,
        }
    }

    pub fn participant_event(session_id: &SessionId, participant_id: &ParticipantId, action: AuditAction) -> Self {
        Self {
            timestamp: Utc::now(),
            session_id: Some(session_id.clone()),
            participant_id: Some(participant_id.clone()),
            action,
            success: true,
            detail: None,
        }
    }

    pub fn failed(mut self, detail: impl Into<String>) -> Self {
        self.success = false;
        self.detail = Some(detail.into());
        self
    }

    /// Serializes this event as a single JSON line, the format the
    /// embedding application's log shipper expects.
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Append-only, in-memory audit sink. `citadel_transport` drains this
/// periodically to a persistent store; this crate only guarantees ordering
/// and structure.
#[derive(Default)]
pub struct AuditSink {
    events: Mutex<Vec<AuditEvent>>,
}

impl AuditSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn record(&self, event: AuditEvent) {
        tracing::debug!(action = ?event.action, success = event.success, "session audit event");
        self.events.lock().await.push(event);
    }

    pub async fn snapshot(&self) -> Vec<AuditEvent> {
        self.events.lock().await.clone()
    }
}

pub fn state_change_action(from: SessionState, to: SessionState) -> AuditAction {
    AuditAction::SessionStateChanged { from: from.to_string(), to: to.to_string() }
}

pub fn joined_action(role: Role) -> AuditAction {
    AuditAction::ParticipantJoined { role: role.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sink_records_events_in_order() {
        let sink = AuditSink::new();
        let session_id = SessionId::generate();
        sink.record(AuditEvent::session_event(&session_id, AuditAction::SessionCreated)).await;
        sink.record(AuditEvent::session_event(&session_id, state_change_action(SessionState::Created, SessionState::Active))).await;

        let events = sink.snapshot().await;
        assert_eq!(events.len(), 2);
        assert!(events[0].success);
    }

    #[test]
    fn event_serializes_to_a_single_json_line() {
        let session_id = SessionId::generate();
        let event = AuditEvent::session_event(&session_id, AuditAction::HandshakeFailed { reason: "timeout".into() }).failed("peer unreachable");
        let line = event.to_json_line().unwrap();
        assert!(!line.contains('\n'));
        assert!(line.contains("peer unreachable"));
    }
}
