//! TLS-1.3-style per-record nonce derivation: XOR a big-endian 64-bit
//! sequence number into the low 8 bytes of a fixed base IV.

use crate::error::{CoreError, Result};

pub fn calculate_nonce(base_iv: &[u8], sequence: u64) -> Result<Vec<u8>> {
    if base_iv.len() < 8 {
        return Err(CoreError::InvalidIvLength { expected: 8, actual: base_iv.len() });
    }
    let mut nonce = base_iv.to_vec();
    let seq_bytes = sequence.to_be_bytes();
    let offset = nonce.len() - 8;
    for i in 0..8 {
        nonce[offset + i] ^= seq_bytes[i];
    }
    Ok(nonce)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_zero_is_identity() {
        let base = [1u8; 12];
        let nonce = calculate_nonce(&base, 0).unwrap();
        assert_eq!(nonce, base);
    }

    #[test]
    fn distinct_sequences_give_distinct_nonces() {
        let base = [0u8; 12];
        let n1 = calculate_nonce(&base, 1).unwrap();
        let n2 = calculate_nonce(&base, 2).unwrap();
        assert_ne!(n1, n2);
    }

    #[test]
    fn only_low_eight_bytes_change() {
        let base = [0xAAu8; 12];
        let nonce = calculate_nonce(&base, 0xFFFF_FFFF_FFFF_FFFF).unwrap();
        assert_eq!(&nonce[..4], &base[..4]);
        assert_ne!(&nonce[4..], &base[4..]);
    }

    #[test]
    fn short_base_iv_rejected() {
        assert!(calculate_nonce(&[0u8; 4], 1).is_err());
    }
}
