//! Stream-cipher primitive adapter: ChaCha20-Poly1305 processed in 64 KiB
//! chunks, each framed on the wire as `nonce(12) || ciphertext || tag(16)`.
//! Chunking keeps per-record memory bounded and keeps any one AEAD
//! invocation's input within the sizes its security proof assumes.

use crate::error::{CoreError, Result};

use super::aead::{chacha20poly1305_open, chacha20poly1305_seal};

const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;
pub const CHUNK_LEN: usize = 64 * 1024;

/// Splits `plaintext` into `CHUNK_LEN`-sized chunks, seals each with a
/// nonce derived from `base_nonce` XORed with the chunk index, and
/// concatenates the per-chunk `nonce || ciphertext || tag` frames.
pub fn encrypt_chunked(key: &[u8], base_nonce: &[u8], plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
    require_len(key, KEY_LEN)?;
    require_len(base_nonce, NONCE_LEN)?;
    let mut base = [0u8; NONCE_LEN];
    base.copy_from_slice(base_nonce);

    let mut out = Vec::with_capacity(plaintext.len() + plaintext.len() / CHUNK_LEN.max(1) * (NONCE_LEN + TAG_LEN) + NONCE_LEN + TAG_LEN);
    for (index, chunk) in chunks_at_least_one(plaintext).enumerate() {
        let chunk_nonce = chunk_nonce(&base, index as u64);
        let sealed = chacha20poly1305_seal(key, &chunk_nonce, chunk, aad)?;
        out.extend_from_slice(&chunk_nonce);
        out.extend_from_slice(&sealed);
    }
    Ok(out)
}

/// XORs a big-endian chunk index into the low 8 bytes of `base_nonce`, the
/// same per-record nonce derivation used at the session layer, kept as a
/// private copy here so this primitive module has no dependency upward on
/// the strategy layer.
fn chunk_nonce(base_nonce: &[u8; NONCE_LEN], index: u64) -> [u8; NONCE_LEN] {
    let mut nonce = *base_nonce;
    let index_bytes = index.to_be_bytes();
    for i in 0..8 {
        nonce[NONCE_LEN - 8 + i] ^= index_bytes[i];
    }
    nonce
}

/// Inverse of [`encrypt_chunked`]: parses each `nonce || ciphertext || tag`
/// frame, opens it, and concatenates the recovered plaintext chunks.
pub fn decrypt_chunked(key: &[u8], framed: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
    require_len(key, KEY_LEN)?;
    let mut out = Vec::with_capacity(framed.len());
    let mut cursor = framed;
    while !cursor.is_empty() {
        if cursor.len() < NONCE_LEN + TAG_LEN {
            return Err(CoreError::InvalidAlgorithmInput("truncated stream-cipher chunk frame"));
        }
        let (nonce, rest) = cursor.split_at(NONCE_LEN);
        let frame_len = (CHUNK_LEN + TAG_LEN).min(rest.len());
        let (body, remainder) = rest.split_at(frame_len);
        let plain = chacha20poly1305_open(key, nonce, body, aad)?;
        out.extend_from_slice(&plain);
        cursor = remainder;
    }
    Ok(out)
}

/// Yields `data` split into `CHUNK_LEN`-sized pieces, always yielding at
/// least one (possibly empty) chunk so a zero-length plaintext still
/// produces one authenticated frame.
fn chunks_at_least_one(data: &[u8]) -> impl Iterator<Item = &[u8]> {
    if data.is_empty() {
        vec![data].into_iter()
    } else {
        data.chunks(CHUNK_LEN).collect::<Vec<_>>().into_iter()
    }
}

fn require_len(buf: &[u8], expected: usize) -> Result<()> {
    if buf.len() != expected {
        return Err(CoreError::InvalidParameterSize { expected, actual: buf.len() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_chunk_roundtrips() {
        let key = [7u8; 32];
        let base_nonce = [9u8; 12];
        let pt = b"stream cipher payload";
        let framed = encrypt_chunked(&key, &base_nonce, pt, b"").unwrap();
        assert_eq!(framed.len(), NONCE_LEN + pt.len() + TAG_LEN);
        let rt = decrypt_chunked(&key, &framed, b"").unwrap();
        assert_eq!(rt, pt);
    }

    #[test]
    fn multi_chunk_payload_roundtrips() {
        let key = [3u8; 32];
        let base_nonce = [1u8; 12];
        let pt = vec![0xABu8; CHUNK_LEN * 2 + 37];
        let framed = encrypt_chunked(&key, &base_nonce, &pt, b"meta").unwrap();
        assert_eq!(framed.len(), pt.len() + 3 * (NONCE_LEN + TAG_LEN));
        let rt = decrypt_chunked(&key, &framed, b"meta").unwrap();
        assert_eq!(rt, pt);
    }

    #[test]
    fn empty_payload_still_produces_one_frame() {
        let key = [5u8; 32];
        let base_nonce = [0u8; 12];
        let framed = encrypt_chunked(&key, &base_nonce, b"", b"").unwrap();
        assert_eq!(framed.len(), NONCE_LEN + TAG_LEN);
        let rt = decrypt_chunked(&key, &framed, b"").unwrap();
        assert!(rt.is_empty());
    }

    #[test]
    fn wrong_key_length_rejected() {
        let err = encrypt_chunked(&[0u8; 16], &[0u8; 12], b"x", b"").unwrap_err();
        assert!(matches!(err, CoreError::InvalidParameterSize { .. }));
    }

    #[test]
    fn tampered_chunk_fails_authentication() {
        let key = [2u8; 32];
        let base_nonce = [4u8; 12];
        let mut framed = encrypt_chunked(&key, &base_nonce, b"tamper me", b"").unwrap();
        let last = framed.len() - 1;
        framed[last] ^= 0xFF;
        assert!(decrypt_chunked(&key, &framed, b"").is_err());
    }
}
