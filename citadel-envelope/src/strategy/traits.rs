//! Strategy-pattern contracts. A strategy never touches a raw key or
//! plaintext buffer directly — every input and output crosses the
//! boundary as an [`Sdc`], so a caller that only ever goes through these
//! traits cannot accidentally leave a long-lived unmanaged copy of
//! sensitive material on the heap.

use crate::catalog::{CipherType, KemType, SignatureType};
use crate::error::Result;
use crate::sdc::Sdc;

/// Shared identity every cipher-family strategy carries.
pub trait CipherStrategy {
    fn cipher_type(&self) -> CipherType;
    fn algorithm_id(&self) -> &'static str {
        self.cipher_type().id()
    }
}

pub trait BlockCipherStrategy: CipherStrategy {
    /// `iv` seeds the cipher when `iv_chaining` is `false`. When
    /// `iv_chaining` is `true` and the mode is not ECB, the returned
    /// segment is `iv || ciphertext` so the IV travels with the data
    /// instead of needing out-of-band agreement.
    fn encrypt(&self, key: &Sdc, iv: &[u8], plaintext: &Sdc, iv_chaining: bool) -> Result<Sdc>;
    /// `iv` is used verbatim when `iv_inference` is `false`. When
    /// `iv_inference` is `true`, the leading 16 bytes of `ciphertext`
    /// are taken as the IV and stripped before decryption — the
    /// inverse of `encrypt`'s `iv_chaining`.
    fn decrypt(&self, key: &Sdc, iv: &[u8], ciphertext: &Sdc, iv_inference: bool) -> Result<Sdc>;
}

pub trait StreamCipherStrategy: CipherStrategy {
    /// Processes `plaintext` in 64 KiB chunks; for ChaCha20-Poly1305 each
    /// chunk is framed on the wire as `nonce(12) || ciphertext || tag(16)`
    /// — an explicit wire format, not an implementation detail.
    fn stream_encrypt(&self, key: &Sdc, base_nonce: &[u8], plaintext: &Sdc) -> Result<Sdc>;
    /// Inverse of `stream_encrypt`: parses the chunk framing and verifies
    /// every chunk's tag before returning the concatenated plaintext.
    fn stream_decrypt(&self, key: &Sdc, ciphertext: &Sdc) -> Result<Sdc>;
}

pub trait AeadCipherStrategy: CipherStrategy {
    fn seal(&self, key: &Sdc, nonce: &[u8], plaintext: &Sdc, aad: &[u8]) -> Result<Sdc>;
    fn open(&self, key: &Sdc, nonce: &[u8], ciphertext: &Sdc, aad: &[u8]) -> Result<Sdc>;
}

pub trait SignatureStrategy {
    fn signature_type(&self) -> SignatureType;
    /// Returns `(public_key, secret_key)`.
    fn keygen(&self) -> Result<(Sdc, Sdc)>;
    fn sign(&self, secret_key: &Sdc, message: &[u8]) -> Result<Sdc>;
    fn verify(&self, public_key: &Sdc, message: &[u8], signature: &Sdc) -> Result<bool>;
}

pub trait KemStrategy {
    fn kem_type(&self) -> KemType;
    /// Returns `(public_key, secret_key)`.
    fn keygen(&self) -> Result<(Sdc, Sdc)>;
    /// Returns an [`Sdc`] whose segment is the shared secret and whose
    /// first binding (`sdc.get(0)`) is the ciphertext, so the two travel
    /// together as one handle instead of as a loose pair.
    fn encapsulate(&self, public_key: &Sdc) -> Result<Sdc>;
    fn decapsulate(&self, secret_key: &Sdc, ciphertext: &Sdc) -> Result<Sdc>;
}

pub trait EcdhStrategy {
    /// Returns `(public_key, secret_key)`.
    fn keygen(&self) -> Result<(Sdc, Sdc)>;
    fn agree(&self, secret_key: &Sdc, peer_public_key: &Sdc) -> Result<Sdc>;
}
