//! AEAD primitive adapters: AES-256-GCM, AES-256-CCM, ChaCha20-Poly1305.

use aes_gcm::{aead::Payload, Aes256Gcm};
use ccm::aead::{Aead, KeyInit};
use ccm::consts::{U12, U16};
use ccm::Ccm;
use chacha20poly1305::ChaCha20Poly1305;

use crate::error::{CoreError, Result};

type Aes256Ccm = Ccm<aes::Aes256, U16, U12>;

pub const KEY_LEN: usize = 32;
pub const GCM_NONCE_LEN: usize = 12;
pub const CCM_NONCE_LEN: usize = 12;
pub const TAG_LEN: usize = 16;

pub fn gcm_seal(key: &[u8], nonce: &[u8], plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
    require_len(key, KEY_LEN)?;
    require_nonce(nonce, GCM_NONCE_LEN)?;
    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| CoreError::InvalidParameterSize {
        expected: KEY_LEN,
        actual: key.len(),
    })?;
    let n = aes_gcm::Nonce::from_slice(nonce);
    cipher
        .encrypt(n, Payload { msg: plaintext, aad })
        .map_err(|_| CoreError::AuthenticationFailed)
}

pub fn gcm_open(key: &[u8], nonce: &[u8], ciphertext: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
    require_len(key, KEY_LEN)?;
    require_nonce(nonce, GCM_NONCE_LEN)?;
    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| CoreError::InvalidParameterSize {
        expected: KEY_LEN,
        actual: key.len(),
    })?;
    let n = aes_gcm::Nonce::from_slice(nonce);
    cipher
        .decrypt(n, Payload { msg: ciphertext, aad })
        .map_err(|_| CoreError::AuthenticationFailed)
}

pub fn ccm_seal(key: &[u8], nonce: &[u8], plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
    require_len(key, KEY_LEN)?;
    require_nonce(nonce, CCM_NONCE_LEN)?;
    let cipher = Aes256Ccm::new_from_slice(key).map_err(|_| CoreError::InvalidParameterSize {
        expected: KEY_LEN,
        actual: key.len(),
    })?;
    let n = ccm::aead::generic_array::GenericArray::from_slice(nonce);
    cipher
        .encrypt(n, Payload { msg: plaintext, aad })
        .map_err(|_| CoreError::AuthenticationFailed)
}

pub fn ccm_open(key: &[u8], nonce: &[u8], ciphertext: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
    require_len(key, KEY_LEN)?;
    require_nonce(nonce, CCM_NONCE_LEN)?;
    let cipher = Aes256Ccm::new_from_slice(key).map_err(|_| CoreError::InvalidParameterSize {
        expected: KEY_LEN,
        actual: key.len(),
    })?;
    let n = ccm::aead::generic_array::GenericArray::from_slice(nonce);
    cipher
        .decrypt(n, Payload { msg: ciphertext, aad })
        .map_err(|_| CoreError::AuthenticationFailed)
}

pub fn chacha20poly1305_seal(key: &[u8], nonce: &[u8], plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
    require_len(key, KEY_LEN)?;
    require_nonce(nonce, GCM_NONCE_LEN)?;
    let cipher =
        ChaCha20Poly1305::new_from_slice(key).map_err(|_| CoreError::InvalidParameterSize {
            expected: KEY_LEN,
            actual: key.len(),
        })?;
    let n = chacha20poly1305::Nonce::from_slice(nonce);
    cipher
        .encrypt(n, Payload { msg: plaintext, aad })
        .map_err(|_| CoreError::AuthenticationFailed)
}

pub fn chacha20poly1305_open(key: &[u8], nonce: &[u8], ciphertext: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
    require_len(key, KEY_LEN)?;
    require_nonce(nonce, GCM_NONCE_LEN)?;
    let cipher =
        ChaCha20Poly1305::new_from_slice(key).map_err(|_| CoreError::InvalidParameterSize {
            expected: KEY_LEN,
            actual: key.len(),
        })?;
    let n = chacha20poly1305::Nonce::from_slice(nonce);
    cipher
        .decrypt(n, Payload { msg: ciphertext, aad })
        .map_err(|_| CoreError::AuthenticationFailed)
}

fn require_len(buf: &[u8], expected: usize) -> Result<()> {
    if buf.len() != expected {
        return Err(CoreError::InvalidParameterSize { expected, actual: buf.len() });
    }
    Ok(())
}

fn require_nonce(nonce: &[u8], expected: usize) -> Result<()> {
    if nonce.len() != expected {
        return Err(CoreError::InvalidIvLength { expected, actual: nonce.len() });
    }
    Ok(())
}
