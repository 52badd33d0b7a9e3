use citadel_envelope::catalog::{CipherType, KemType, Mode, Padding};
use citadel_envelope::hybrid::HybridX25519MlKem768Strategy;
use citadel_envelope::sdc::Sdc;
use citadel_envelope::strategy::block_cipher::AesCipher;
use citadel_envelope::strategy::traits::{AeadCipherStrategy, BlockCipherStrategy, KemStrategy};
use citadel_envelope::strategy::calculate_nonce;

fn sdc_from(bytes: &[u8]) -> Sdc {
    let mut owned = bytes.to_vec();
    Sdc::new_from(&mut owned, true).unwrap()
}

#[test]
fn hybrid_kem_end_to_end_roundtrip() {
    let strategy = HybridX25519MlKem768Strategy;
    let (public, secret) = strategy.keygen().unwrap();
    let shared_a = strategy.encapsulate(&public).unwrap();
    let ciphertext = shared_a.get(0).unwrap();
    let shared_b = strategy.decapsulate(&secret, &ciphertext).unwrap();
    assert_eq!(shared_a.as_byte_buffer().unwrap(), shared_b.as_byte_buffer().unwrap());

    public.close();
    secret.close();
    shared_a.close();
    shared_b.close();
}

#[test]
fn hybrid_kem_wrong_secret_key_disagrees() {
    let strategy = HybridX25519MlKem768Strategy;
    let (public, _secret) = strategy.keygen().unwrap();
    let (_, other_secret) = strategy.keygen().unwrap();
    let shared_a = strategy.encapsulate(&public).unwrap();
    let ciphertext = shared_a.get(0).unwrap();

    let shared_b = strategy.decapsulate(&other_secret, &ciphertext).unwrap();
    assert_ne!(shared_a.as_byte_buffer().unwrap(), shared_b.as_byte_buffer().unwrap());
}

#[test]
fn aead_seal_open_roundtrip_with_sequence_derived_nonce() {
    use citadel_envelope::strategy::aead::AeadCipher;

    let key = sdc_from(&[0x42u8; 32]);
    let base_iv = [0u8; 12];
    let strategy = AeadCipher::aes256_gcm();

    let plaintext = sdc_from(b"record under test");
    let nonce = calculate_nonce(&base_iv, 3).unwrap();
    let ciphertext = strategy.seal(&key, &nonce, &plaintext, b"handshake").unwrap();
    let recovered = strategy.open(&key, &nonce, &ciphertext, b"handshake").unwrap();
    assert_eq!(recovered.as_byte_buffer().unwrap(), b"record under test");

    key.close();
    plaintext.close();
    ciphertext.close();
    recovered.close();
}

#[test]
fn aead_rejects_wrong_aad() {
    use citadel_envelope::strategy::aead::AeadCipher;

    let key = sdc_from(&[0x01u8; 32]);
    let nonce = calculate_nonce(&[0u8; 12], 0).unwrap();
    let strategy = AeadCipher::aes256_gcm();

    let plaintext = sdc_from(b"data");
    let ciphertext = strategy.seal(&key, &nonce, &plaintext, b"good-aad").unwrap();
    assert!(strategy.open(&key, &nonce, &ciphertext, b"bad-aad").is_err());

    key.close();
    plaintext.close();
    ciphertext.close();
}

#[test]
fn block_cipher_strategy_roundtrips_across_padding_boundary() {
    let key = sdc_from(&[0x07u8; 32]);
    let iv = [0x09u8; 16];
    let strategy = AesCipher::new(CipherType::Aes256, Mode::Cbc, Padding::Pkcs7);

    for len in [0usize, 1, 15, 16, 17, 1024] {
        let plaintext = sdc_from(&vec![0xCDu8; len]);
        let ciphertext = strategy.encrypt(&key, &iv, &plaintext, false).unwrap();
        let recovered = strategy.decrypt(&key, &iv, &ciphertext, false).unwrap();
        assert_eq!(recovered.as_byte_buffer().unwrap(), plaintext.as_byte_buffer().unwrap());
        plaintext.close();
        ciphertext.close();
        recovered.close();
    }
    key.close();
}

/// Scenario S1: AES-256-CBC with a 32-zero-byte key, a 16-zero-byte IV,
/// plaintext "Hello, AES!" (11 bytes), PKCS5 padding, iv_chaining=true —
/// decrypting the result must recover the plaintext and the output must
/// be exactly 16 (IV) + 16 (one padded ciphertext block) bytes long.
#[test]
fn s1_aes256_cbc_iv_chaining_output_length_matches_iv_plus_one_block() {
    let key = sdc_from(&[0u8; 32]);
    let iv = [0u8; 16];
    let strategy = AesCipher::new(CipherType::Aes256, Mode::Cbc, Padding::Pkcs5);

    let plaintext = sdc_from(b"Hello, AES!");
    let ciphertext = strategy.encrypt(&key, &iv, &plaintext, true).unwrap();
    assert_eq!(ciphertext.byte_size().unwrap(), 16 + 16);

    let recovered = strategy.decrypt(&key, &[], &ciphertext, true).unwrap();
    assert_eq!(recovered.as_byte_buffer().unwrap(), plaintext.as_byte_buffer().unwrap());

    key.close();
    plaintext.close();
    ciphertext.close();
    recovered.close();
}

#[test]
fn sdc_tree_close_wipes_every_binding() {
    let parent = Sdc::new(16).unwrap();
    let child = parent.add_container_sized(32).unwrap();
    let grandchild = child.add_container_sized(8).unwrap();

    parent.close();

    assert!(!parent.arena().alive());
    assert!(!child.arena().alive());
    assert!(!grandchild.arena().alive());
}

#[test]
fn hybrid_ciphertext_size_matches_catalog() {
    let strategy = HybridX25519MlKem768Strategy;
    let (public, secret) = strategy.keygen().unwrap();
    let shared = strategy.encapsulate(&public).unwrap();
    let ciphertext = shared.get(0).unwrap();

    let params = KemType::HybridX25519MlKem768.parameters();
    assert_eq!(ciphertext.byte_size().unwrap(), params.ciphertext_len);
    assert_eq!(shared.byte_size().unwrap(), params.shared_secret_len);

    public.close();
    secret.close();
    shared.close();
}
