use crate::arena::RuntimeHint;
use crate::catalog::CipherType;
use crate::error::Result;
use crate::primitive::stream;
use crate::sdc::Sdc;

use super::traits::{CipherStrategy, StreamCipherStrategy};

pub struct ChaCha20Cipher;

impl CipherStrategy for ChaCha20Cipher {
    fn cipher_type(&self) -> CipherType {
        CipherType::ChaCha20
    }
}

impl StreamCipherStrategy for ChaCha20Cipher {
    fn stream_encrypt(&self, key: &Sdc, base_nonce: &[u8], plaintext: &Sdc) -> Result<Sdc> {
        let key_bytes = key.as_byte_buffer()?;
        let pt_bytes = plaintext.as_byte_buffer()?;
        let framed = stream::encrypt_chunked(&key_bytes, base_nonce, &pt_bytes, b"")?;
        Sdc::from_owned(framed, RuntimeHint::Confined)
    }

    fn stream_decrypt(&self, key: &Sdc, ciphertext: &Sdc) -> Result<Sdc> {
        let key_bytes = key.as_byte_buffer()?;
        let framed = ciphertext.as_byte_buffer()?;
        let plain = stream::decrypt_chunked(&key_bytes, &framed, b"")?;
        Sdc::from_owned(plain, RuntimeHint::Confined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chacha20_strategy_roundtrips_through_chunk_framing() {
        let mut key_bytes = vec![7u8; 32];
        let key = Sdc::new_from(&mut key_bytes, true).unwrap();
        let base_nonce = [9u8; 12];
        let mut pt_bytes = b"stream strategy".to_vec();
        let plaintext = Sdc::new_from(&mut pt_bytes, true).unwrap();

        let strategy = ChaCha20Cipher;
        let ciphertext = strategy.stream_encrypt(&key, &base_nonce, &plaintext).unwrap();
        assert_eq!(ciphertext.byte_size().unwrap(), 12 + b"stream strategy".len() + 16);
        let recovered = strategy.stream_decrypt(&key, &ciphertext).unwrap();

        assert_eq!(recovered.as_byte_buffer().unwrap(), b"stream strategy");
        key.close();
        plaintext.close();
        ciphertext.close();
        recovered.close();
    }

    #[test]
    fn chacha20_strategy_chunks_payloads_larger_than_one_chunk() {
        let mut key_bytes = vec![3u8; 32];
        let key = Sdc::new_from(&mut key_bytes, true).unwrap();
        let base_nonce = [1u8; 12];
        let mut pt_bytes = vec![0xABu8; stream::CHUNK_LEN + 512];
        let plaintext = Sdc::new_from(&mut pt_bytes, true).unwrap();

        let strategy = ChaCha20Cipher;
        let ciphertext = strategy.stream_encrypt(&key, &base_nonce, &plaintext).unwrap();
        assert_eq!(ciphertext.byte_size().unwrap(), plaintext.byte_size().unwrap() + 2 * (12 + 16));
        let recovered = strategy.stream_decrypt(&key, &ciphertext).unwrap();

        assert_eq!(recovered.as_byte_buffer().unwrap(), plaintext.as_byte_buffer().unwrap());
        key.close();
        plaintext.close();
        ciphertext.close();
        recovered.close();
    }
}
