//! The strategy core: one trait per crypto contract (block cipher, stream
//! cipher, AEAD, signature, KEM, ECDH) and the concrete implementations
//! the [`crate::registry`] wires up as bundles.

pub mod traits;
pub mod nonce;
pub mod block_cipher;
pub mod stream_cipher;
pub mod aead;
pub mod signature;
pub mod kem;
pub mod ecdh;

pub use traits::{
    AeadCipherStrategy, BlockCipherStrategy, CipherStrategy, EcdhStrategy, KemStrategy,
    SignatureStrategy, StreamCipherStrategy,
};
pub use nonce::calculate_nonce;
