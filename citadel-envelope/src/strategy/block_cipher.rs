use crate::catalog::{CipherType, Mode, Padding};
use crate::error::{CoreError, Result};
use crate::primitive::block;
use crate::sdc::Sdc;

use super::traits::{BlockCipherStrategy, CipherStrategy};

/// IV length block ciphers use, in bytes. Fixed at 16 since this
/// strategy only ever drives AES/ARIA, never an AEAD mode.
const BLOCK_IV_LEN: usize = 16;

fn chain_iv(mode: Mode, iv_chaining: bool, iv: &[u8], mut ciphertext: Vec<u8>) -> Vec<u8> {
    if iv_chaining && mode != Mode::Ecb {
        let mut out = iv.to_vec();
        out.append(&mut ciphertext);
        out
    } else {
        ciphertext
    }
}

fn infer_iv<'a>(mode: Mode, iv_inference: bool, iv: &'a [u8], ciphertext: &'a [u8]) -> Result<(&'a [u8], &'a [u8])> {
    if iv_inference && mode != Mode::Ecb {
        if ciphertext.len() < BLOCK_IV_LEN {
            return Err(CoreError::InvalidIvLength { expected: BLOCK_IV_LEN, actual: ciphertext.len() });
        }
        Ok((&ciphertext[..BLOCK_IV_LEN], &ciphertext[BLOCK_IV_LEN..]))
    } else {
        Ok((iv, ciphertext))
    }
}

pub struct AesCipher {
    pub variant: CipherType,
    pub mode: Mode,
    pub padding: Padding,
}

impl AesCipher {
    pub fn new(variant: CipherType, mode: Mode, padding: Padding) -> Self {
        Self { variant, mode, padding }
    }
}

impl CipherStrategy for AesCipher {
    fn cipher_type(&self) -> CipherType {
        self.variant
    }
}

impl BlockCipherStrategy for AesCipher {
    fn encrypt(&self, key: &Sdc, iv: &[u8], plaintext: &Sdc, iv_chaining: bool) -> Result<Sdc> {
        let key_bytes = key.as_byte_buffer()?;
        let pt_bytes = plaintext.as_byte_buffer()?;
        let ct = block::encrypt(self.variant, self.mode, &key_bytes, iv, self.padding, &pt_bytes)?;
        Sdc::from_owned(chain_iv(self.mode, iv_chaining, iv, ct), crate::arena::RuntimeHint::Confined)
    }

    fn decrypt(&self, key: &Sdc, iv: &[u8], ciphertext: &Sdc, iv_inference: bool) -> Result<Sdc> {
        let key_bytes = key.as_byte_buffer()?;
        let ct_bytes = ciphertext.as_byte_buffer()?;
        let (iv, ct_bytes) = infer_iv(self.mode, iv_inference, iv, &ct_bytes)?;
        let pt = block::decrypt(self.variant, self.mode, &key_bytes, iv, self.padding, ct_bytes)?;
        Sdc::from_owned(pt, crate::arena::RuntimeHint::Confined)
    }
}

pub struct AriaCipher {
    pub variant: CipherType,
    pub mode: Mode,
    pub padding: Padding,
}

impl AriaCipher {
    pub fn new(variant: CipherType, mode: Mode, padding: Padding) -> Self {
        Self { variant, mode, padding }
    }
}

impl CipherStrategy for AriaCipher {
    fn cipher_type(&self) -> CipherType {
        self.variant
    }
}

impl BlockCipherStrategy for AriaCipher {
    fn encrypt(&self, key: &Sdc, iv: &[u8], plaintext: &Sdc, iv_chaining: bool) -> Result<Sdc> {
        let key_bytes = key.as_byte_buffer()?;
        let pt_bytes = plaintext.as_byte_buffer()?;
        let ct = block::encrypt(self.variant, self.mode, &key_bytes, iv, self.padding, &pt_bytes)?;
        Sdc::from_owned(chain_iv(self.mode, iv_chaining, iv, ct), crate::arena::RuntimeHint::Confined)
    }

    fn decrypt(&self, key: &Sdc, iv: &[u8], ciphertext: &Sdc, iv_inference: bool) -> Result<Sdc> {
        let key_bytes = key.as_byte_buffer()?;
        let ct_bytes = ciphertext.as_byte_buffer()?;
        let (iv, ct_bytes) = infer_iv(self.mode, iv_inference, iv, &ct_bytes)?;
        let pt = block::decrypt(self.variant, self.mode, &key_bytes, iv, self.padding, ct_bytes)?;
        Sdc::from_owned(pt, crate::arena::RuntimeHint::Confined)
    }
}
