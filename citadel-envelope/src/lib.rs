//! # citadel-envelope
//!
//! Off-heap sensitive-data containers and a pluggable PQC/classical crypto
//! strategy core.
//!
//! ## Quick start
//!
//! ```rust
//! use citadel_envelope::{registry::registry, catalog::KemType, sdc::Sdc};
//!
//! let kem = registry().kem(KemType::HybridX25519MlKem768).unwrap();
//! let (public_key, secret_key) = kem.keygen().unwrap();
//! let shared_a = kem.encapsulate(&public_key).unwrap();
//! let ciphertext = shared_a.get(0).unwrap();
//! let shared_b = kem.decapsulate(&secret_key, &ciphertext).unwrap();
//! assert_eq!(shared_a.as_byte_buffer().unwrap(), shared_b.as_byte_buffer().unwrap());
//!
//! public_key.close();
//! secret_key.close();
//! shared_a.close();
//! shared_b.close();
//! ```
//!
//! ## Security properties
//!
//! - **Hybrid KEM**: X25519 + ML-KEM-768 — secure if either holds.
//! - **Off-heap discipline**: every key, shared secret and signature lives
//!   in an [`sdc::Sdc`] with deterministic, arena-scoped zeroization.
//! - **Uniform errors**: every failure collapses to [`error::CoreError`].
//!
//! ## What's NOT provided
//!
//! - Session/participant lifecycle (see `citadel-session`).
//! - The network reactor and handshake protocol (see `citadel-transport`).
//! - FIPS certification.

#![deny(unsafe_code)]
#![doc(html_root_url = "https://docs.rs/citadel-envelope/0.1.0")]

pub mod arena;
pub mod catalog;
pub mod error;
pub mod hybrid;
pub mod native;
pub mod primitive;
pub mod registry;
pub mod sdc;
pub mod strategy;

pub use error::{CoreError, Result};
pub use sdc::Sdc;
