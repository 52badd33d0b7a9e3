//! Known-answer tests for the algorithm catalog: every byte length in
//! [`citadel_envelope::catalog`] must match the governing FIPS document.

use citadel_envelope::catalog::{KemType, SignatureType};
use citadel_envelope::registry::registry;

#[test]
fn ml_kem_parameter_sizes_match_fips_203() {
    let p512 = KemType::MlKem512.parameters();
    assert_eq!((p512.public_key_len, p512.secret_key_len, p512.ciphertext_len, p512.shared_secret_len), (800, 1632, 768, 32));

    let p768 = KemType::MlKem768.parameters();
    assert_eq!((p768.public_key_len, p768.secret_key_len, p768.ciphertext_len, p768.shared_secret_len), (1184, 2400, 1088, 32));

    let p1024 = KemType::MlKem1024.parameters();
    assert_eq!((p1024.public_key_len, p1024.secret_key_len, p1024.ciphertext_len, p1024.shared_secret_len), (1568, 3168, 1568, 32));
}

#[test]
fn hybrid_kem_sizes_prepend_x25519_material() {
    let hybrid = KemType::HybridX25519MlKem768.parameters();
    let inner = KemType::MlKem768.parameters();
    assert_eq!(hybrid.public_key_len, 32 + inner.public_key_len);
    assert_eq!(hybrid.secret_key_len, 32 + inner.secret_key_len);
    assert_eq!(hybrid.ciphertext_len, 32 + inner.ciphertext_len);
    assert_eq!(hybrid.shared_secret_len, 32 + inner.shared_secret_len);
}

#[test]
fn ml_dsa_parameter_sizes_match_fips_204() {
    let p44 = SignatureType::MlDsa44.parameters();
    assert_eq!((p44.public_key_len, p44.secret_key_len, p44.signature_len), (1312, 2560, 2420));

    let p65 = SignatureType::MlDsa65.parameters();
    assert_eq!((p65.public_key_len, p65.secret_key_len, p65.signature_len), (1952, 4032, 3309));

    let p87 = SignatureType::MlDsa87.parameters();
    assert_eq!((p87.public_key_len, p87.secret_key_len, p87.signature_len), (2592, 4896, 4627));
}

#[test]
fn slh_dsa_parameter_sizes_match_fips_205() {
    let s128s = SignatureType::SlhDsaSha2_128s.parameters();
    assert_eq!((s128s.public_key_len, s128s.secret_key_len, s128s.signature_len), (32, 64, 7856));

    let s128f = SignatureType::SlhDsaSha2_128f.parameters();
    assert_eq!((s128f.public_key_len, s128f.secret_key_len, s128f.signature_len), (32, 64, 17088));

    let s192s = SignatureType::SlhDsaSha2_192s.parameters();
    assert_eq!((s192s.public_key_len, s192s.secret_key_len, s192s.signature_len), (48, 96, 16224));

    let s256s = SignatureType::SlhDsaSha2_256s.parameters();
    assert_eq!((s256s.public_key_len, s256s.secret_key_len, s256s.signature_len), (64, 128, 29792));
}

#[test]
fn registry_kem_strategy_produces_catalog_sized_keys() {
    let kem = registry().kem(KemType::MlKem768).expect("ml-kem-768 strategy registered");
    let (public, secret) = kem.keygen().unwrap();

    let params = KemType::MlKem768.parameters();
    assert_eq!(public.byte_size().unwrap(), params.public_key_len);
    assert_eq!(secret.byte_size().unwrap(), params.secret_key_len);

    public.close();
    secret.close();
}

#[test]
fn registry_signature_strategy_produces_catalog_sized_signature() {
    let sig = registry()
        .signature(SignatureType::MlDsa65)
        .expect("ml-dsa-65 strategy registered");
    let (public, secret) = sig.keygen().unwrap();

    let message = b"known answer message";
    let signature = sig.sign(&secret, message).unwrap();
    assert_eq!(signature.byte_size().unwrap(), SignatureType::MlDsa65.parameters().signature_len);
    assert!(sig.verify(&public, message, &signature).unwrap());

    public.close();
    secret.close();
    signature.close();
}

#[test]
fn registry_signature_verify_rejects_tampered_message() {
    let sig = registry()
        .signature(SignatureType::MlDsa44)
        .expect("ml-dsa-44 strategy registered");
    let (public, secret) = sig.keygen().unwrap();

    let signature = sig.sign(&secret, b"original").unwrap();
    assert!(!sig.verify(&public, b"tampered", &signature).unwrap());

    public.close();
    secret.close();
    signature.close();
}
