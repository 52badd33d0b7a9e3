//! Byte-oriented primitive adapters.
//!
//! Everything here is a thin, allocation-light wrapper around a single
//! RustCrypto (or `dalek`/`ml-kem`/`ml-dsa`/`slh-dsa`) primitive. No
//! catalog validation, no SDC awareness — that discipline lives one layer
//! up, in `strategy`. A primitive function either does the one thing it's
//! named for or returns a `CoreError`.

pub mod block;
pub mod stream;
pub mod aead;
pub mod signature;
pub mod kem;
pub mod ecdh;
