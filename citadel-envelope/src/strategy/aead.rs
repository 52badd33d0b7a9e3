use crate::arena::RuntimeHint;
use crate::catalog::{CipherType, Mode};
use crate::error::{CoreError, Result};
use crate::primitive::aead as aead_primitive;
use crate::sdc::Sdc;

use super::traits::{AeadCipherStrategy, CipherStrategy};

pub struct AeadCipher {
    pub cipher: CipherType,
    pub mode: Mode,
}

impl AeadCipher {
    pub fn aes256_gcm() -> Self {
        Self { cipher: CipherType::Aes256, mode: Mode::AeadGcm }
    }

    pub fn aes256_ccm() -> Self {
        Self { cipher: CipherType::Aes256, mode: Mode::AeadCcm }
    }

    pub fn chacha20_poly1305() -> Self {
        Self { cipher: CipherType::ChaCha20, mode: Mode::AeadChaCha20Poly1305 }
    }
}

impl CipherStrategy for AeadCipher {
    fn cipher_type(&self) -> CipherType {
        self.cipher
    }
}

impl AeadCipherStrategy for AeadCipher {
    fn seal(&self, key: &Sdc, nonce: &[u8], plaintext: &Sdc, aad: &[u8]) -> Result<Sdc> {
        let key_bytes = key.as_byte_buffer()?;
        let pt_bytes = plaintext.as_byte_buffer()?;
        let ct = match self.mode {
            Mode::AeadGcm => aead_primitive::gcm_seal(&key_bytes, nonce, &pt_bytes, aad)?,
            Mode::AeadCcm => aead_primitive::ccm_seal(&key_bytes, nonce, &pt_bytes, aad)?,
            Mode::AeadChaCha20Poly1305 => {
                aead_primitive::chacha20poly1305_seal(&key_bytes, nonce, &pt_bytes, aad)?
            }
            _ => return Err(CoreError::InvalidAlgorithmInput("not an aead mode")),
        };
        Sdc::from_owned(ct, RuntimeHint::Confined)
    }

    fn open(&self, key: &Sdc, nonce: &[u8], ciphertext: &Sdc, aad: &[u8]) -> Result<Sdc> {
        let key_bytes = key.as_byte_buffer()?;
        let ct_bytes = ciphertext.as_byte_buffer()?;
        let pt = match self.mode {
            Mode::AeadGcm => aead_primitive::gcm_open(&key_bytes, nonce, &ct_bytes, aad)?,
            Mode::AeadCcm => aead_primitive::ccm_open(&key_bytes, nonce, &ct_bytes, aad)?,
            Mode::AeadChaCha20Poly1305 => {
                aead_primitive::chacha20poly1305_open(&key_bytes, nonce, &ct_bytes, aad)?
            }
            _ => return Err(CoreError::InvalidAlgorithmInput("not an aead mode")),
        };
        Sdc::from_owned(pt, RuntimeHint::Confined)
    }
}
