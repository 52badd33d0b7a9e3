//! Two-round handshake: `CLIENT_HELLO` → `SERVER_HELLO` → `FINISHED`,
//! driving a participant from HANDSHAKING to ESTABLISHED.

use citadel_envelope::hybrid::HybridX25519MlKem768Strategy;
use citadel_envelope::sdc::Sdc;
use citadel_envelope::strategy::traits::KemStrategy;
use citadel_session::{Participant, ParticipantState};

use crate::error::{Result, TransportError};
use crate::frame::{
    encode_client_hello, encode_finished, encode_server_hello, parse_client_hello, parse_server_hello,
    try_parse_frame, HandshakeMessageType,
};

/// The client side: send `CLIENT_HELLO`, then complete on `SERVER_HELLO`.
pub struct ClientHandshake {
    strategy: HybridX25519MlKem768Strategy,
    secret_key: Sdc,
}

impl ClientHandshake {
    pub fn start() -> Result<(Self, Vec<u8>)> {
        let strategy = HybridX25519MlKem768Strategy;
        let (public, secret) = strategy.keygen()?;
        let public_bytes = public.as_byte_buffer()?;
        public.close();
        let frame = encode_client_hello(&public_bytes).to_vec();
        Ok((Self { strategy, secret_key: secret }, frame))
    }

    /// Processes `SERVER_HELLO`, establishes the participant, and returns
    /// the `FINISHED` frame to send back.
    pub fn complete(self, frame: &[u8], participant: &Participant, base_iv: [u8; 12]) -> Result<Vec<u8>> {
        let (msg_type, payload) = try_parse_frame(frame).ok_or(TransportError::MalformedFrame("empty frame"))?;
        if msg_type != HandshakeMessageType::ServerHello {
            return Err(TransportError::MalformedFrame("expected SERVER_HELLO"));
        }
        let (server_public_key, encap_result) = parse_server_hello(payload)?;
        let peer_public_key = Sdc::from_owned(server_public_key, citadel_envelope::arena::RuntimeHint::Confined)?;
        let ciphertext = Sdc::from_owned(encap_result, citadel_envelope::arena::RuntimeHint::Confined)?;
        let shared_secret = self.strategy.decapsulate(&self.secret_key, &ciphertext)?;
        ciphertext.close();
        self.secret_key.close();

        participant.establish_with(
            shared_secret,
            base_iv,
            Some(self.strategy.kem_type().id().to_string()),
            Some(peer_public_key),
        )?;
        Ok(encode_finished().to_vec())
    }
}

/// The server side: given `CLIENT_HELLO`, produce `SERVER_HELLO`, then
/// establish once `FINISHED` arrives.
pub struct ServerHandshake;

impl ServerHandshake {
    /// Parses `CLIENT_HELLO` and returns the `SERVER_HELLO` frame plus the
    /// shared secret to establish the participant with once `FINISHED`
    /// arrives.
    pub fn respond(frame: &[u8]) -> Result<(Vec<u8>, Sdc, Sdc)> {
        let (msg_type, payload) = try_parse_frame(frame).ok_or(TransportError::MalformedFrame("empty frame"))?;
        if msg_type != HandshakeMessageType::ClientHello {
            return Err(TransportError::MalformedFrame("expected CLIENT_HELLO"));
        }
        let client_public_bytes = parse_client_hello(payload)?;
        let client_public = Sdc::from_owned(client_public_bytes, citadel_envelope::arena::RuntimeHint::AsyncServer)?;

        let strategy = HybridX25519MlKem768Strategy;
        let shared_secret = strategy.encapsulate(&client_public)?;
        let ciphertext = shared_secret.get(0).ok_or(TransportError::MalformedFrame("encapsulate returned no ciphertext binding"))?;

        let (server_public, server_secret) = strategy.keygen()?;
        let server_public_bytes = server_public.as_byte_buffer()?;
        server_public.close();
        server_secret.close();

        let ciphertext_bytes = ciphertext.as_byte_buffer()?;

        let frame = encode_server_hello(&server_public_bytes, &ciphertext_bytes).to_vec();
        Ok((frame, shared_secret, client_public))
    }

    pub fn finish(
        frame: &[u8],
        participant: &Participant,
        shared_secret: Sdc,
        peer_public_key: Sdc,
        base_iv: [u8; 12],
    ) -> Result<()> {
        let (msg_type, _) = try_parse_frame(frame).ok_or(TransportError::MalformedFrame("empty frame"))?;
        if msg_type != HandshakeMessageType::Finished {
            return Err(TransportError::MalformedFrame("expected FINISHED"));
        }
        participant.establish_with(
            shared_secret,
            base_iv,
            Some(HybridX25519MlKem768Strategy.kem_type().id().to_string()),
            Some(peer_public_key),
        )?;
        Ok(())
    }
}

/// Aborts a participant stuck in HANDSHAKING past the configured budget.
pub fn enforce_handshake_timeout(participant: &Participant, elapsed: std::time::Duration, budget: std::time::Duration) -> Result<()> {
    if participant.state() == ParticipantState::Handshaking && elapsed >= budget {
        participant.close();
        return Err(TransportError::HandshakeTimeout);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use citadel_session::Role;

    #[test]
    fn full_handshake_establishes_matching_shared_secret_based_keys() {
        let (client, client_hello) = ClientHandshake::start().unwrap();
        let (server_hello, server_shared, client_public) = ServerHandshake::respond(&client_hello).unwrap();

        let client_participant = Participant::new(Role::Initiator);
        let finished = client.complete(&server_hello, &client_participant, [0u8; 12]).unwrap();
        assert_eq!(client_participant.state(), ParticipantState::Established);

        let server_participant = Participant::new(Role::Responder);
        server_participant.transition_to(ParticipantState::Handshaking).unwrap();
        ServerHandshake::finish(&finished, &server_participant, server_shared, client_public, [0u8; 12]).unwrap();
        assert_eq!(server_participant.state(), ParticipantState::Established);

        let negotiated = server_participant.security().as_ref().unwrap().negotiated_strategy();
        assert_eq!(negotiated.as_deref(), Some("Hybrid-X25519-ML-KEM-768"));
        assert!(server_participant.security().as_ref().unwrap().peer_public_key().is_some());
    }

    #[test]
    fn server_rejects_oversized_client_hello() {
        let mut oversized = vec![HandshakeMessageType::ClientHello as u8];
        oversized.extend_from_slice(&((16 * 1024 + 1) as i32).to_be_bytes());
        let err = ServerHandshake::respond(&oversized).unwrap_err();
        assert!(matches!(err, TransportError::HandshakeOverflow { .. }));
    }

    #[test]
    fn timeout_closes_handshaking_participant() {
        let participant = Participant::new(Role::Responder);
        participant.transition_to(ParticipantState::Handshaking).unwrap();
        let err = enforce_handshake_timeout(
            &participant,
            std::time::Duration::from_secs(30),
            std::time::Duration::from_secs(10),
        )
        .unwrap_err();
        assert!(matches!(err, TransportError::HandshakeTimeout));
        assert_eq!(participant.state(), ParticipantState::Closed);
    }
}
