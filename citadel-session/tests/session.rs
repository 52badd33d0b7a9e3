use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use citadel_session::session::{Session, SessionListener};
use citadel_session::{Participant, Role, SessionConfig, SessionId, SessionState};

struct CountingListener {
    joined: AtomicUsize,
    left: AtomicUsize,
}

impl SessionListener for CountingListener {
    fn on_participant_joined(&self, _session: &SessionId, _participant: &citadel_session::ParticipantId) {
        self.joined.fetch_add(1, Ordering::SeqCst);
    }
    fn on_participant_left(&self, _session: &SessionId, _participant: &citadel_session::ParticipantId) {
        self.left.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn session_accepts_participants_while_created_and_active() {
    let session = Session::create(None, SessionConfig::default());
    let initiator = Arc::new(Participant::new(Role::Initiator));
    session.add_participant(initiator.clone()).unwrap();
    assert_eq!(session.participant_count(), 1);

    session.activate().unwrap();
    let responder = Arc::new(Participant::new(Role::Responder));
    session.add_participant(responder).unwrap();
    assert_eq!(session.participant_count(), 2);
}

#[test]
fn session_rejects_participants_once_closing() {
    let session = Session::create(None, SessionConfig::default());
    session.activate().unwrap();
    session.close().unwrap();

    let late = Arc::new(Participant::new(Role::Initiator));
    assert!(session.add_participant(late).is_err());
}

#[test]
fn role_index_tracks_observer_and_custom_roles_independently() {
    let session = Session::create(None, SessionConfig::default());
    let observer = Arc::new(Participant::new(Role::Observer));
    let auditor = Arc::new(Participant::new(Role::Custom("auditor".to_string())));
    session.add_participant(observer.clone()).unwrap();
    session.add_participant(auditor.clone()).unwrap();

    assert_eq!(session.get_participants_by_role(&Role::Observer).len(), 1);
    assert_eq!(session.get_participants_by_role(&Role::Custom("auditor".to_string())).len(), 1);
    assert!(session.get_participants_by_role(&Role::Custom("other".to_string())).is_empty());
}

#[test]
fn session_enforces_max_participants() {
    let config = SessionConfig { max_participants: 1, ..SessionConfig::default() };
    let session = Session::create(None, config);
    session.add_participant(Arc::new(Participant::new(Role::Initiator))).unwrap();
    let result = session.add_participant(Arc::new(Participant::new(Role::Responder)));
    assert!(result.is_err());
}

#[test]
fn session_rejects_duplicate_participant_id() {
    let session = Session::create(None, SessionConfig::default());
    let participant = Arc::new(Participant::new(Role::Initiator));
    session.add_participant(participant.clone()).unwrap();
    assert!(session.add_participant(participant).is_err());
}

#[test]
fn removing_participant_fires_listener_and_updates_role_index() {
    let session = Session::create(None, SessionConfig::default());
    let listener = Arc::new(CountingListener { joined: AtomicUsize::new(0), left: AtomicUsize::new(0) });
    session.add_listener(listener.clone());

    let participant = Arc::new(Participant::new(Role::Initiator));
    session.add_participant(participant.clone()).unwrap();
    assert_eq!(listener.joined.load(Ordering::SeqCst), 1);

    session.remove_participant(participant.id()).unwrap();
    assert_eq!(listener.left.load(Ordering::SeqCst), 1);
    assert!(session.get_participants_by_role(&Role::Initiator).is_empty());
}

#[test]
fn close_transitions_through_closing_to_closed_and_closes_participants() {
    let session = Session::create(None, SessionConfig::default());
    session.activate().unwrap();
    let participant = Arc::new(Participant::new(Role::Initiator));
    session.add_participant(participant.clone()).unwrap();

    session.close().unwrap();
    assert_eq!(session.state(), SessionState::Closed);
    assert_eq!(session.participant_count(), 0);
    assert_eq!(participant.state(), citadel_session::ParticipantState::Closed);
}

#[test]
fn close_is_idempotent_when_called_twice() {
    let session = Session::create(None, SessionConfig::default());
    session.activate().unwrap();
    session.close().unwrap();
    assert_eq!(session.state(), SessionState::Closed);

    session.close().unwrap();
    assert_eq!(session.state(), SessionState::Closed);
}

#[test]
fn terminate_is_unconditional_from_any_state() {
    let session = Session::create(None, SessionConfig::default());
    session.terminate();
    assert_eq!(session.state(), SessionState::Terminated);
}

#[test]
fn invalid_state_transition_is_rejected() {
    let session = Session::create(None, SessionConfig::default());
    assert!(session.suspend().is_err());
}
