//! Unified error taxonomy for the envelope core.
//!
//! Every crypto or container failure in this crate collapses to one of
//! these kinds. Close paths never surface these — see `sdc::Sdc::close`.

use core::fmt;

/// A single flat error type shared across arenas, containers, strategies
/// and the registry. Variants mirror the kinds enumerated in the core's
/// error-handling design; there is deliberately no per-module error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Required configuration (e.g. an environment variable) was absent.
    EnvMissing(&'static str),
    /// A native symbol the `native-backend` feature expected was not linked.
    NativeMissing(&'static str),
    /// A native call returned a non-zero result code.
    NativeFailure(i32),
    /// Operation attempted on a closed SDC or arena.
    AlreadyDisposed,
    /// Input size did not match the catalog entry for the algorithm.
    InvalidParameterSize { expected: usize, actual: usize },
    /// IV length was invalid for the requested mode.
    InvalidIvLength { expected: usize, actual: usize },
    /// Malformed or out-of-range crypto input that isn't a size mismatch.
    InvalidAlgorithmInput(&'static str),
    /// AEAD authentication tag did not verify.
    AuthenticationFailed,
    /// KEM encapsulate/decapsulate failed inside the underlying primitive.
    KemProcessingFailure,
    /// Sign/verify failed inside the underlying primitive.
    SignatureProcessingFailure,
    /// Requested (identifier, strategy-contract) pairing is not registered.
    UnsupportedAlgorithm(&'static str),
    /// Arena access from a thread other than the confined owner.
    WrongThreadAccess,
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnvMissing(name) => write!(f, "missing required environment variable: {name}"),
            Self::NativeMissing(sym) => write!(f, "native symbol not linked: {sym}"),
            Self::NativeFailure(code) => write!(f, "native call failed with code {code}"),
            Self::AlreadyDisposed => write!(f, "operation on a closed container"),
            Self::InvalidParameterSize { expected, actual } => {
                write!(f, "invalid parameter size: expected {expected}, got {actual}")
            }
            Self::InvalidIvLength { expected, actual } => {
                write!(f, "invalid iv length: expected {expected}, got {actual}")
            }
            Self::InvalidAlgorithmInput(reason) => write!(f, "invalid algorithm input: {reason}"),
            Self::AuthenticationFailed => write!(f, "authentication failed"),
            Self::KemProcessingFailure => write!(f, "kem processing failure"),
            Self::SignatureProcessingFailure => write!(f, "signature processing failure"),
            Self::UnsupportedAlgorithm(id) => write!(f, "unsupported algorithm: {id}"),
            Self::WrongThreadAccess => write!(f, "confined arena accessed from a foreign thread"),
        }
    }
}

impl std::error::Error for CoreError {}

pub type Result<T> = std::result::Result<T, CoreError>;
