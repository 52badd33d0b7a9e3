#![no_main]

use libfuzzer_sys::fuzz_target;

// Arbitrary bytes fed straight into the hybrid KEM's ciphertext splitter —
// it must never panic, only ever return an error for malformed input.
fuzz_target!(|data: &[u8]| {
    use citadel_envelope::arena::RuntimeHint;
    use citadel_envelope::catalog::KemType;
    use citadel_envelope::hybrid::HybridX25519MlKem768Strategy;
    use citadel_envelope::sdc::Sdc;
    use citadel_envelope::strategy::KemStrategy;

    let strategy = HybridX25519MlKem768Strategy;
    let Ok((_public, secret)) = strategy.keygen() else { return };
    let Ok(ciphertext) = Sdc::from_owned(data.to_vec(), RuntimeHint::Confined) else { return };
    let _ = strategy.decapsulate(&secret, &ciphertext);
    let _ = KemType::HybridX25519MlKem768.parameters();
});
