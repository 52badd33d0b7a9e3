//! The algorithm parameter catalog: every identifier, key/ciphertext size
//! and mode/padding combination the strategy layer is allowed to use.
//!
//! Sizes below are taken from the underlying FIPS 203/204/205 parameter
//! sets and from the hybrid composition in [`crate::hybrid`]; they are the
//! single source of truth `strategy::*` validates input against before
//! ever touching a primitive.

/// Symmetric cipher family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherType {
    Aes128,
    Aes192,
    Aes256,
    Aria128,
    Aria192,
    Aria256,
    ChaCha20,
}

impl CipherType {
    pub const fn key_len(self) -> usize {
        match self {
            Self::Aes128 | Self::Aria128 => 16,
            Self::Aes192 | Self::Aria192 => 24,
            Self::Aes256 | Self::Aria256 | Self::ChaCha20 => 32,
        }
    }

    pub const fn block_len(self) -> usize {
        match self {
            Self::ChaCha20 => 1,
            _ => 16,
        }
    }

    pub const fn is_stream(self) -> bool {
        matches!(self, Self::ChaCha20)
    }

    pub const fn id(self) -> &'static str {
        match self {
            Self::Aes128 => "AES-128",
            Self::Aes192 => "AES-192",
            Self::Aes256 => "AES-256",
            Self::Aria128 => "ARIA-128",
            Self::Aria192 => "ARIA-192",
            Self::Aria256 => "ARIA-256",
            Self::ChaCha20 => "ChaCha20",
        }
    }
}

/// Key-encapsulation mechanism family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KemType {
    MlKem512,
    MlKem768,
    MlKem1024,
    HybridX25519MlKem768,
}

/// Parameter sizes for one KEM, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KemParameterSizeDetail {
    pub public_key_len: usize,
    pub secret_key_len: usize,
    pub ciphertext_len: usize,
    pub shared_secret_len: usize,
}

impl KemType {
    pub const fn id(self) -> &'static str {
        match self {
            Self::MlKem512 => "ML-KEM-512",
            Self::MlKem768 => "ML-KEM-768",
            Self::MlKem1024 => "ML-KEM-1024",
            Self::HybridX25519MlKem768 => "Hybrid-X25519-ML-KEM-768",
        }
    }

    pub const fn parameters(self) -> KemParameterSizeDetail {
        const X25519_KEY_BYTES: usize = 32;
        match self {
            Self::MlKem512 => KemParameterSizeDetail {
                public_key_len: 800,
                secret_key_len: 1632,
                ciphertext_len: 768,
                shared_secret_len: 32,
            },
            Self::MlKem768 => KemParameterSizeDetail {
                public_key_len: 1184,
                secret_key_len: 2400,
                ciphertext_len: 1088,
                shared_secret_len: 32,
            },
            Self::MlKem1024 => KemParameterSizeDetail {
                public_key_len: 1568,
                secret_key_len: 3168,
                ciphertext_len: 1568,
                shared_secret_len: 32,
            },
            Self::HybridX25519MlKem768 => {
                let inner = Self::MlKem768.parameters();
                KemParameterSizeDetail {
                    public_key_len: X25519_KEY_BYTES + inner.public_key_len,
                    secret_key_len: X25519_KEY_BYTES + inner.secret_key_len,
                    ciphertext_len: X25519_KEY_BYTES + inner.ciphertext_len,
                    shared_secret_len: X25519_KEY_BYTES + inner.shared_secret_len,
                }
            }
        }
    }
}

/// Signature scheme family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureType {
    MlDsa44,
    MlDsa65,
    MlDsa87,
    SlhDsaSha2_128s,
    SlhDsaSha2_128f,
    SlhDsaSha2_192s,
    SlhDsaSha2_256s,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureParameterSizeDetail {
    pub public_key_len: usize,
    pub secret_key_len: usize,
    pub signature_len: usize,
}

impl SignatureType {
    pub const fn id(self) -> &'static str {
        match self {
            Self::MlDsa44 => "ML-DSA-44",
            Self::MlDsa65 => "ML-DSA-65",
            Self::MlDsa87 => "ML-DSA-87",
            Self::SlhDsaSha2_128s => "SLH-DSA-SHA2-128s",
            Self::SlhDsaSha2_128f => "SLH-DSA-SHA2-128f",
            Self::SlhDsaSha2_192s => "SLH-DSA-SHA2-192s",
            Self::SlhDsaSha2_256s => "SLH-DSA-SHA2-256s",
        }
    }

    pub const fn parameters(self) -> SignatureParameterSizeDetail {
        match self {
            Self::MlDsa44 => SignatureParameterSizeDetail {
                public_key_len: 1312,
                secret_key_len: 2560,
                signature_len: 2420,
            },
            Self::MlDsa65 => SignatureParameterSizeDetail {
                public_key_len: 1952,
                secret_key_len: 4032,
                signature_len: 3309,
            },
            Self::MlDsa87 => SignatureParameterSizeDetail {
                public_key_len: 2592,
                secret_key_len: 4896,
                signature_len: 4627,
            },
            Self::SlhDsaSha2_128s => SignatureParameterSizeDetail {
                public_key_len: 32,
                secret_key_len: 64,
                signature_len: 7856,
            },
            Self::SlhDsaSha2_128f => SignatureParameterSizeDetail {
                public_key_len: 32,
                secret_key_len: 64,
                signature_len: 17088,
            },
            Self::SlhDsaSha2_192s => SignatureParameterSizeDetail {
                public_key_len: 48,
                secret_key_len: 96,
                signature_len: 16224,
            },
            Self::SlhDsaSha2_256s => SignatureParameterSizeDetail {
                public_key_len: 64,
                secret_key_len: 128,
                signature_len: 29792,
            },
        }
    }
}

/// Digest family used by the KDF and by strategy-internal hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestType {
    Sha256,
    Sha384,
    Sha512,
    Sha3_256,
    Sha3_512,
}

impl DigestType {
    pub const fn output_len(self) -> usize {
        match self {
            Self::Sha256 | Self::Sha3_256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 | Self::Sha3_512 => 64,
        }
    }
}

/// Block-cipher mode of operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Ecb,
    Cbc,
    Cfb,
    Ofb,
    Ctr,
    AeadGcm,
    AeadCcm,
    AeadChaCha20Poly1305,
}

impl Mode {
    pub const fn is_aead(self) -> bool {
        matches!(self, Self::AeadGcm | Self::AeadCcm | Self::AeadChaCha20Poly1305)
    }

    /// IV/nonce length this mode expects, in bytes.
    pub const fn iv_len(self) -> usize {
        match self {
            Self::Ecb => 0,
            Self::AeadCcm => 13,
            _ => 12,
        }
    }
}

/// Block-cipher and asymmetric padding scheme.
///
/// `Pkcs1` and `OaepAndMgf1` are RSA-only schemes; this catalog carries
/// them for completeness of the identifier space, but no block-cipher
/// strategy in this crate accepts them — see [`Padding::is_block_cipher_compatible`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Padding {
    Pkcs5,
    Pkcs7,
    Iso7816,
    Iso10126,
    ZeroByte,
    Pkcs1,
    OaepAndMgf1,
    No,
}

impl Padding {
    /// Whether a block-cipher strategy may apply this scheme. The two
    /// RSA padding schemes in this enum are carried for completeness of
    /// the algorithm identifier space but have no meaning outside an
    /// asymmetric encrypt/decrypt, which this crate does not implement.
    pub const fn is_block_cipher_compatible(self) -> bool {
        !matches!(self, Self::Pkcs1 | Self::OaepAndMgf1)
    }
}
