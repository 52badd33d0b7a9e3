//! Hybrid X25519 + ML-KEM-768 composition.
//!
//! Classical material comes first on the wire, then the PQC component;
//! the combined shared secret is the concatenation of both. Every key,
//! ciphertext and shared secret lives in an [`Sdc`] rather than a bare
//! `Vec<u8>`.

use crate::arena::RuntimeHint;
use crate::catalog::KemType;
use crate::error::Result;
use crate::primitive::{ecdh, kem};
use crate::sdc::Sdc;
use crate::strategy::traits::KemStrategy;

const X25519_KEY_BYTES: usize = 32;

/// Hybrid public key: `x25519_pk[32] || mlkem_ek[1184]`.
/// Hybrid secret key: `x25519_sk[32] || mlkem_dk[2400]`.
/// Hybrid ciphertext: `x25519_ephemeral_pk[32] || mlkem_ct[1088]`.
/// Combined shared secret: `x25519_dh[32] || mlkem_ss[32]`.
pub struct HybridX25519MlKem768Strategy;

impl KemStrategy for HybridX25519MlKem768Strategy {
    fn kem_type(&self) -> KemType {
        KemType::HybridX25519MlKem768
    }

    fn keygen(&self) -> Result<(Sdc, Sdc)> {
        let x25519_kp = ecdh::keygen();
        let mlkem_kp = kem::keygen(KemType::MlKem768)?;

        let mut public_key = Vec::with_capacity(X25519_KEY_BYTES + mlkem_kp.public_key.len());
        public_key.extend_from_slice(&x25519_kp.public_key);
        public_key.extend_from_slice(&mlkem_kp.public_key);

        let mut secret_key = Vec::with_capacity(X25519_KEY_BYTES + mlkem_kp.secret_key.len());
        secret_key.extend_from_slice(&x25519_kp.secret_key);
        secret_key.extend_from_slice(&mlkem_kp.secret_key);

        let public = Sdc::from_owned(public_key, RuntimeHint::Confined)?;
        let secret = Sdc::from_owned(secret_key, RuntimeHint::Confined)?;
        Ok((public, secret))
    }

    fn encapsulate(&self, public_key: &Sdc) -> Result<Sdc> {
        let pk_bytes = public_key.as_byte_buffer()?;
        let (x25519_peer, mlkem_ek) = split_public(&pk_bytes)?;

        let (x25519_eph_pk, x25519_ss) = ecdh::ephemeral_agree(x25519_peer)?;
        let mlkem_result = kem::encapsulate(KemType::MlKem768, mlkem_ek)?;

        let mut shared_secret = Vec::with_capacity(X25519_KEY_BYTES + mlkem_result.shared_secret.len());
        shared_secret.extend_from_slice(&x25519_ss);
        shared_secret.extend_from_slice(&mlkem_result.shared_secret);

        let mut ciphertext = Vec::with_capacity(X25519_KEY_BYTES + mlkem_result.ciphertext.len());
        ciphertext.extend_from_slice(&x25519_eph_pk);
        ciphertext.extend_from_slice(&mlkem_result.ciphertext);

        let shared_secret = Sdc::from_owned(shared_secret, RuntimeHint::Confined)?;
        let ciphertext = Sdc::from_owned(ciphertext, RuntimeHint::Confined)?;
        shared_secret.add_container_data(ciphertext)?;
        Ok(shared_secret)
    }

    fn decapsulate(&self, secret_key: &Sdc, ciphertext: &Sdc) -> Result<Sdc> {
        let sk_bytes = secret_key.as_byte_buffer()?;
        let ct_bytes = ciphertext.as_byte_buffer()?;
        let (x25519_sk, mlkem_dk) = split_secret(&sk_bytes)?;
        let (x25519_eph_pk, mlkem_ct) = split_ciphertext(&ct_bytes)?;

        let x25519_ss = ecdh::agree(x25519_sk, x25519_eph_pk)?;
        let mlkem_ss = kem::decapsulate(KemType::MlKem768, mlkem_dk, mlkem_ct)?;

        let mut shared_secret = Vec::with_capacity(X25519_KEY_BYTES + mlkem_ss.len());
        shared_secret.extend_from_slice(&x25519_ss);
        shared_secret.extend_from_slice(&mlkem_ss);

        Sdc::from_owned(shared_secret, RuntimeHint::Confined)
    }
}

fn split_public(bytes: &[u8]) -> Result<(&[u8], &[u8])> {
    require_exact_len(bytes, KemType::HybridX25519MlKem768.parameters().public_key_len)?;
    Ok(bytes.split_at(X25519_KEY_BYTES))
}

fn split_secret(bytes: &[u8]) -> Result<(&[u8], &[u8])> {
    require_exact_len(bytes, KemType::HybridX25519MlKem768.parameters().secret_key_len)?;
    Ok(bytes.split_at(X25519_KEY_BYTES))
}

fn split_ciphertext(bytes: &[u8]) -> Result<(&[u8], &[u8])> {
    require_exact_len(bytes, KemType::HybridX25519MlKem768.parameters().ciphertext_len)?;
    Ok(bytes.split_at(X25519_KEY_BYTES))
}

fn require_exact_len(bytes: &[u8], expected: usize) -> Result<()> {
    if bytes.len() != expected {
        return Err(crate::error::CoreError::InvalidParameterSize { expected, actual: bytes.len() });
    }
    Ok(())
}
