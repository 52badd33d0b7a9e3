use citadel_envelope::catalog::{KemType, SignatureType};
use citadel_envelope::sdc::Sdc;
use citadel_session::session::SessionSecurityContext;
use citadel_session::{Participant, Role};

fn sdc(bytes: &[u8]) -> Sdc {
    let mut owned = bytes.to_vec();
    Sdc::new_from(&mut owned, true).unwrap()
}

#[test]
fn initialize_is_idempotent_until_cleared() {
    let ctx = SessionSecurityContext::new();
    ctx.initialize(sdc(&[1u8; 32]), None, KemType::HybridX25519MlKem768, SignatureType::MlDsa65, true).unwrap();
    assert!(ctx.is_initialized());

    // second call while still initialized is a no-op, not an error
    ctx.initialize(sdc(&[2u8; 32]), None, KemType::HybridX25519MlKem768, SignatureType::MlDsa65, true).unwrap();
    assert!(ctx.is_initialized());
}

#[test]
fn rotate_key_fails_before_initialization() {
    let ctx = SessionSecurityContext::new();
    assert!(ctx.rotate_key(sdc(&[9u8; 32]), None).is_err());
}

#[test]
fn rotate_key_swaps_master_and_closes_old_handle() {
    let ctx = SessionSecurityContext::new();
    ctx.initialize(sdc(&[1u8; 32]), Some(sdc(&[2u8; 16])), KemType::MlKem768, SignatureType::MlDsa44, false).unwrap();

    ctx.rotate_key(sdc(&[3u8; 32]), None).unwrap();
    assert!(ctx.is_initialized());
    assert!(!ctx.needs_key_rotation(std::time::Duration::from_secs(3600)));
}

#[test]
fn clear_closes_master_and_salt() {
    let ctx = SessionSecurityContext::new();
    ctx.initialize(sdc(&[4u8; 32]), Some(sdc(&[5u8; 16])), KemType::MlKem512, SignatureType::SlhDsaSha2_128s, false).unwrap();
    ctx.clear();
    assert!(!ctx.is_initialized());
}

#[test]
fn participant_security_context_sequence_numbers_never_repeat() {
    let participant = Participant::new(Role::Initiator);
    participant.establish(sdc(&[7u8; 32]), [0u8; 12]).unwrap();

    let guard = participant.security();
    let ctx = guard.as_ref().unwrap();

    let nonce_a = ctx.next_write_nonce().unwrap();
    let nonce_b = ctx.next_write_nonce().unwrap();
    assert_ne!(nonce_a, nonce_b);
}

#[test]
fn closing_participant_clears_security_context() {
    let participant = Participant::new(Role::Responder);
    participant.establish(sdc(&[8u8; 32]), [0u8; 12]).unwrap();
    assert!(participant.security().as_ref().unwrap().is_established());

    participant.close();
    assert!(participant.security().is_none());
}
