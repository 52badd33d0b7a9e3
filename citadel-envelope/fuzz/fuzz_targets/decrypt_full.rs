#![no_main]

use libfuzzer_sys::fuzz_target;
use once_cell::sync::Lazy;

static KEY: Lazy<[u8; 32]> = Lazy::new(|| [0x11u8; 32]);

fuzz_target!(|data: &[u8]| {
    use citadel_envelope::arena::RuntimeHint;
    use citadel_envelope::primitive::aead;
    use citadel_envelope::sdc::Sdc;

    if data.len() < 12 {
        return;
    }
    let (nonce, ciphertext) = data.split_at(12);

    let Ok(key) = Sdc::from_owned(KEY.to_vec(), RuntimeHint::Confined) else { return };
    let key_bytes = key.as_byte_buffer().unwrap();
    let _ = aead::gcm_open(&key_bytes, nonce, ciphertext, b"");
    key.close();
});
