//! citadel-envelope — Interactive Demo
//!
//! Run with: `cargo run --example demo`
//!
//! Walks through the hybrid KEM, AEAD sealing with sequence-derived nonces,
//! signature strategies, and off-heap container lifecycle.

use citadel_envelope::catalog::{CipherType, KemType, Mode, SignatureType};
use citadel_envelope::hybrid::HybridX25519MlKem768Strategy;
use citadel_envelope::registry::registry;
use citadel_envelope::sdc::Sdc;
use citadel_envelope::strategy::aead::AeadCipher;
use citadel_envelope::strategy::calculate_nonce;
use citadel_envelope::strategy::traits::{AeadCipherStrategy, KemStrategy, SignatureStrategy};
use std::time::Instant;

fn main() {
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║          citadel-envelope — Hybrid Post-Quantum Demo            ║");
    println!("║       X25519 + ML-KEM-768 (FIPS 203) + AES-256-GCM               ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");

    demo_parameters();
    demo_hybrid_keygen();
    demo_aead_roundtrip();
    demo_tamper_detection();
    demo_ml_dsa_signature();
    demo_sdc_lifecycle();
    demo_payload_scaling();

    println!("\n✓ All demos passed.");
}

// ---------------------------------------------------------------------------

fn section(title: &str) {
    println!("\n┌─────────────────────────────────────────────────────────────────┐");
    println!("│ {:<63} │", title);
    println!("└─────────────────────────────────────────────────────────────────┘");
}

// ---------------------------------------------------------------------------

fn demo_parameters() {
    section("1. Catalog Parameters");

    let hybrid = KemType::HybridX25519MlKem768.parameters();
    println!("  Hybrid KEM:       X25519 + ML-KEM-768");
    println!("  Public key size:  {} bytes  (X25519: 32 + ML-KEM-768 ek: 1184)", hybrid.public_key_len);
    println!("  Secret key size:  {} bytes  (X25519: 32 + ML-KEM-768 dk: 2400)", hybrid.secret_key_len);
    println!("  Ciphertext size:  {} bytes  (X25519 ephemeral: 32 + ML-KEM ct: 1088)", hybrid.ciphertext_len);
    println!("  Shared secret:    {} bytes  (X25519 dh: 32 + ML-KEM ss: 32)", hybrid.shared_secret_len);
    println!();
    println!("  Security model:   secure if EITHER X25519 (classical) OR");
    println!("                    ML-KEM-768 (post-quantum) remains secure.");
}

fn demo_hybrid_keygen() {
    section("2. Hybrid Key Generation");

    let strategy = HybridX25519MlKem768Strategy;

    let t = Instant::now();
    let (public, secret) = strategy.keygen().unwrap();
    let elapsed = t.elapsed();

    println!("  Generated hybrid keypair in {:?}", elapsed);
    println!("  Public key:  {} bytes", public.byte_size().unwrap());
    println!("  Secret key:  {} bytes", secret.byte_size().unwrap());

    let t = Instant::now();
    let shared_a = strategy.encapsulate(&public).unwrap();
    let encap_time = t.elapsed();
    let ciphertext = shared_a.get(0).unwrap();

    let t = Instant::now();
    let shared_b = strategy.decapsulate(&secret, &ciphertext).unwrap();
    let decap_time = t.elapsed();

    assert_eq!(shared_a.as_byte_buffer().unwrap(), shared_b.as_byte_buffer().unwrap());
    println!("  Encapsulate: {:?}   Decapsulate: {:?}", encap_time, decap_time);
    println!("  Agreement:   ✓  shared secrets match");

    public.close();
    secret.close();
    shared_a.close();
    shared_b.close();
}

fn demo_aead_roundtrip() {
    section("3. AEAD Sealing With Sequence-Derived Nonces");

    let key = Sdc::new_from(&mut [0x24u8; 32], true).unwrap();
    let base_iv = [0u8; 12];
    let strategy = AeadCipher::aes256_gcm();

    for sequence in 0..3u64 {
        let plaintext_bytes = format!("record #{sequence}").into_bytes();
        let plaintext = Sdc::new_from(&mut plaintext_bytes.clone(), true).unwrap();
        let nonce = calculate_nonce(&base_iv, sequence).unwrap();

        let ciphertext = strategy.seal(&key, &nonce, &plaintext, b"demo-aad").unwrap();
        let recovered = strategy.open(&key, &nonce, &ciphertext, b"demo-aad").unwrap();
        assert_eq!(recovered.as_byte_buffer().unwrap(), plaintext_bytes);

        println!(
            "  seq={sequence}  plaintext={} bytes  ciphertext={} bytes",
            plaintext_bytes.len(),
            ciphertext.byte_size().unwrap()
        );

        plaintext.close();
        ciphertext.close();
        recovered.close();
    }
    key.close();
}

fn demo_tamper_detection() {
    section("4. Tamper Detection");

    let key = Sdc::new_from(&mut [0x77u8; 32], true).unwrap();
    let nonce = calculate_nonce(&[0u8; 12], 5).unwrap();
    let strategy = AeadCipher::aes256_gcm();

    let plaintext = Sdc::new_from(&mut b"integrity-protected data".to_vec(), true).unwrap();
    let ciphertext = strategy.seal(&key, &nonce, &plaintext, b"ctx").unwrap();

    let mut tampered_bytes = ciphertext.as_byte_buffer().unwrap();
    let last = tampered_bytes.len() - 1;
    tampered_bytes[last] ^= 0x01;
    let tampered = Sdc::new_from(&mut tampered_bytes, true).unwrap();

    let result = strategy.open(&key, &nonce, &tampered, b"ctx");
    assert!(result.is_err());
    println!("  Flip last ciphertext byte → Err  ✓");

    let wrong_aad_result = strategy.open(&key, &nonce, &ciphertext, b"wrong-ctx");
    assert!(wrong_aad_result.is_err());
    println!("  Wrong AAD                 → Err  ✓");

    key.close();
    plaintext.close();
    ciphertext.close();
    tampered.close();
}

fn demo_ml_dsa_signature() {
    section("5. ML-DSA-65 Signature");

    let sig = registry().signature(SignatureType::MlDsa65).unwrap();
    let (public, secret) = sig.keygen().unwrap();

    let message = b"authenticate this message";
    let signature = sig.sign(&secret, message).unwrap();
    println!("  Signature: {} bytes", signature.byte_size().unwrap());

    assert!(sig.verify(&public, message, &signature).unwrap());
    println!("  Verify(correct message):   ✓");
    assert!(!sig.verify(&public, b"different message", &signature).unwrap());
    println!("  Verify(tampered message):  rejected  ✓");

    public.close();
    secret.close();
    signature.close();
}

fn demo_sdc_lifecycle() {
    section("6. Off-Heap Container Lifecycle");

    let parent = Sdc::new(32).unwrap();
    let child = parent.add_container_sized(16).unwrap();
    println!("  Parent bindings before close: {}", parent.binding_count());

    parent.close();
    println!("  Parent alive:  {}", parent.arena().alive());
    println!("  Child alive:   {}", child.arena().alive());
    println!("  Closing a parent transitively closes and wipes every binding.");
}

fn demo_payload_scaling() {
    section("7. Performance Across Payload Sizes");

    let key = Sdc::new_from(&mut [0x11u8; 32], true).unwrap();
    let base_iv = [0u8; 12];
    let strategy = AeadCipher::aes256_gcm();

    let sizes: &[usize] = &[64, 1024, 16_384, 65_536, 262_144, 1_048_576];

    println!("  {:>10}  {:>12}  {:>10}  {:>10}", "Plaintext", "Ciphertext", "Seal", "Open");
    println!("  {:>10}  {:>12}  {:>10}  {:>10}", "─────────", "──────────", "────", "────");

    for (sequence, &size) in sizes.iter().enumerate() {
        let mut plaintext_bytes = vec![0xABu8; size];
        let plaintext = Sdc::new_from(&mut plaintext_bytes, true).unwrap();
        let nonce = calculate_nonce(&base_iv, sequence as u64).unwrap();

        let t = Instant::now();
        let ciphertext = strategy.seal(&key, &nonce, &plaintext, b"").unwrap();
        let seal_time = t.elapsed();

        let t = Instant::now();
        let recovered = strategy.open(&key, &nonce, &ciphertext, b"").unwrap();
        let open_time = t.elapsed();

        println!(
            "  {:>10}  {:>12}  {:>10.2?}  {:>10.2?}",
            human_bytes(size),
            human_bytes(ciphertext.byte_size().unwrap()),
            seal_time,
            open_time,
        );

        plaintext.close();
        ciphertext.close();
        recovered.close();
    }
    key.close();
}

// ---------------------------------------------------------------------------

fn human_bytes(n: usize) -> String {
    if n >= 1_048_576 {
        format!("{:.1} MB", n as f64 / 1_048_576.0)
    } else if n >= 1024 {
        format!("{:.1} KB", n as f64 / 1024.0)
    } else {
        format!("{n} B")
    }
}
