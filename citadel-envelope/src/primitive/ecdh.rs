//! X25519 ECDH primitive adapter: the classical half of the hybrid KEM.

use rand_core::OsRng;
use x25519_dalek::{EphemeralSecret, PublicKey, StaticSecret};

use crate::error::{CoreError, Result};

pub const KEY_LEN: usize = 32;

pub struct KeyPairBytes {
    pub public_key: [u8; KEY_LEN],
    pub secret_key: [u8; KEY_LEN],
}

pub fn keygen() -> KeyPairBytes {
    let secret = StaticSecret::random_from_rng(OsRng);
    let public = PublicKey::from(&secret);
    KeyPairBytes {
        public_key: *public.as_bytes(),
        secret_key: secret.to_bytes(),
    }
}

/// Ephemeral keypair plus the DH output against `peer_public`, in one call
/// — the shape `strategy::ecdh` needs for a one-shot KEM-style exchange.
pub fn ephemeral_agree(peer_public: &[u8]) -> Result<([u8; KEY_LEN], [u8; KEY_LEN])> {
    let peer = decode_public(peer_public)?;
    let eph = EphemeralSecret::random_from_rng(OsRng);
    let eph_public = PublicKey::from(&eph);
    let shared = eph.diffie_hellman(&peer);
    Ok((*eph_public.as_bytes(), *shared.as_bytes()))
}

pub fn agree(secret_key: &[u8], peer_public: &[u8]) -> Result<[u8; KEY_LEN]> {
    let secret_bytes: [u8; KEY_LEN] = secret_key
        .try_into()
        .map_err(|_| CoreError::InvalidParameterSize { expected: KEY_LEN, actual: secret_key.len() })?;
    let secret = StaticSecret::from(secret_bytes);
    let peer = decode_public(peer_public)?;
    Ok(*secret.diffie_hellman(&peer).as_bytes())
}

fn decode_public(bytes: &[u8]) -> Result<PublicKey> {
    let arr: [u8; KEY_LEN] = bytes
        .try_into()
        .map_err(|_| CoreError::InvalidParameterSize { expected: KEY_LEN, actual: bytes.len() })?;
    Ok(PublicKey::from(arr))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ephemeral_agree_matches_static_agree() {
        let kp = keygen();
        let (eph_public, shared_a) = ephemeral_agree(&kp.public_key).unwrap();
        let shared_b = agree(&kp.secret_key, &eph_public).unwrap();
        assert_eq!(shared_a, shared_b);
    }

    #[test]
    fn wrong_length_public_key_rejected() {
        assert!(decode_public(&[0u8; 4]).is_err());
    }
}
