//! Process-wide strategy registry.
//!
//! Strategies are grouped into "bundles" (one per algorithm family) and
//! registered once, behind a `OnceLock`, the first time anything asks the
//! registry for a strategy. Callers never construct a strategy directly —
//! they look it up by its catalog identifier, so adding a new bundle never
//! touches call sites.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::catalog::{CipherType, KemType, SignatureType};
use crate::error::{CoreError, Result};
use crate::hybrid::HybridX25519MlKem768Strategy;
use crate::strategy::ecdh::X25519Ecdh;
use crate::strategy::kem::MlKemStrategy;
use crate::strategy::signature::{MlDsaSignature, SlhDsaSignature};
use crate::strategy::stream_cipher::ChaCha20Cipher;
use crate::strategy::traits::{EcdhStrategy, KemStrategy, SignatureStrategy, StreamCipherStrategy};

/// A bundle contributes one or more strategies to the registry under a
/// fixed set of identifiers. Implementing this trait is the only thing a
/// new algorithm family needs to do to become selectable.
pub trait AlgorithmBundle {
    fn register(self: Box<Self>, registry: &mut RegistryBuilder);
}

#[derive(Default)]
pub struct RegistryBuilder {
    signatures: HashMap<SignatureType, Box<dyn SignatureStrategy + Send + Sync>>,
    kems: HashMap<KemType, Box<dyn KemStrategy + Send + Sync>>,
    ecdh: Option<Box<dyn EcdhStrategy + Send + Sync>>,
    stream_ciphers: HashMap<CipherType, Box<dyn StreamCipherStrategy + Send + Sync>>,
}

impl RegistryBuilder {
    pub fn add_signature(&mut self, scheme: SignatureType, strategy: Box<dyn SignatureStrategy + Send + Sync>) {
        self.signatures.insert(scheme, strategy);
    }

    pub fn add_kem(&mut self, scheme: KemType, strategy: Box<dyn KemStrategy + Send + Sync>) {
        self.kems.insert(scheme, strategy);
    }

    pub fn set_ecdh(&mut self, strategy: Box<dyn EcdhStrategy + Send + Sync>) {
        self.ecdh = Some(strategy);
    }

    pub fn add_stream_cipher(&mut self, scheme: CipherType, strategy: Box<dyn StreamCipherStrategy + Send + Sync>) {
        self.stream_ciphers.insert(scheme, strategy);
    }

    fn build(self) -> Registry {
        Registry {
            signatures: self.signatures,
            kems: self.kems,
            ecdh: self.ecdh,
            stream_ciphers: self.stream_ciphers,
        }
    }
}

pub struct Registry {
    signatures: HashMap<SignatureType, Box<dyn SignatureStrategy + Send + Sync>>,
    kems: HashMap<KemType, Box<dyn KemStrategy + Send + Sync>>,
    ecdh: Option<Box<dyn EcdhStrategy + Send + Sync>>,
    stream_ciphers: HashMap<CipherType, Box<dyn StreamCipherStrategy + Send + Sync>>,
}

impl Registry {
    pub fn signature(&self, scheme: SignatureType) -> Result<&(dyn SignatureStrategy + Send + Sync)> {
        self.signatures
            .get(&scheme)
            .map(|b| b.as_ref())
            .ok_or(CoreError::UnsupportedAlgorithm(scheme.id()))
    }

    pub fn kem(&self, scheme: KemType) -> Result<&(dyn KemStrategy + Send + Sync)> {
        self.kems
            .get(&scheme)
            .map(|b| b.as_ref())
            .ok_or(CoreError::UnsupportedAlgorithm(scheme.id()))
    }

    pub fn ecdh(&self) -> Result<&(dyn EcdhStrategy + Send + Sync)> {
        self.ecdh
            .as_deref()
            .ok_or(CoreError::UnsupportedAlgorithm("X25519"))
    }

    pub fn stream_cipher(&self, scheme: CipherType) -> Result<&(dyn StreamCipherStrategy + Send + Sync)> {
        self.stream_ciphers
            .get(&scheme)
            .map(|b| b.as_ref())
            .ok_or(CoreError::UnsupportedAlgorithm(scheme.id()))
    }
}

struct MlDsaBundle;
impl AlgorithmBundle for MlDsaBundle {
    fn register(self: Box<Self>, registry: &mut RegistryBuilder) {
        for scheme in [SignatureType::MlDsa44, SignatureType::MlDsa65, SignatureType::MlDsa87] {
            registry.add_signature(scheme, Box::new(MlDsaSignature::new(scheme)));
        }
    }
}

struct SlhDsaBundle;
impl AlgorithmBundle for SlhDsaBundle {
    fn register(self: Box<Self>, registry: &mut RegistryBuilder) {
        for scheme in [
            SignatureType::SlhDsaSha2_128s,
            SignatureType::SlhDsaSha2_128f,
            SignatureType::SlhDsaSha2_192s,
            SignatureType::SlhDsaSha2_256s,
        ] {
            registry.add_signature(scheme, Box::new(SlhDsaSignature::new(scheme)));
        }
    }
}

struct MlKemBundle;
impl AlgorithmBundle for MlKemBundle {
    fn register(self: Box<Self>, registry: &mut RegistryBuilder) {
        for scheme in [KemType::MlKem512, KemType::MlKem768, KemType::MlKem1024] {
            registry.add_kem(scheme, Box::new(MlKemStrategy::new(scheme)));
        }
    }
}

struct HybridBundle;
impl AlgorithmBundle for HybridBundle {
    fn register(self: Box<Self>, registry: &mut RegistryBuilder) {
        registry.add_kem(
            KemType::HybridX25519MlKem768,
            Box::new(HybridX25519MlKem768Strategy),
        );
    }
}

struct X25519Bundle;
impl AlgorithmBundle for X25519Bundle {
    fn register(self: Box<Self>, registry: &mut RegistryBuilder) {
        registry.set_ecdh(Box::new(X25519Ecdh));
    }
}

struct ChaCha20Bundle;
impl AlgorithmBundle for ChaCha20Bundle {
    fn register(self: Box<Self>, registry: &mut RegistryBuilder) {
        registry.add_stream_cipher(CipherType::ChaCha20, Box::new(ChaCha20Cipher));
    }
}

fn built_in_bundles() -> Vec<Box<dyn AlgorithmBundle>> {
    vec![
        Box::new(MlDsaBundle),
        Box::new(SlhDsaBundle),
        Box::new(MlKemBundle),
        Box::new(HybridBundle),
        Box::new(X25519Bundle),
        Box::new(ChaCha20Bundle),
    ]
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// The process-wide registry, built on first access from the built-in
/// bundles. Block-cipher and AEAD strategies are constructed directly by
/// callers (they take a mode/padding at construction time rather than
/// being keyed by a single catalog identifier) and so are not bundled
/// here; `block_cipher`/`aead` strategy types are public for that reason.
pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(|| {
        let mut builder = RegistryBuilder::default();
        for bundle in built_in_bundles() {
            bundle.register(&mut builder);
        }
        builder.build()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_resolves_hybrid_kem() {
        let r = registry();
        assert!(r.kem(KemType::HybridX25519MlKem768).is_ok());
    }

    #[test]
    fn registry_resolves_all_signature_schemes() {
        let r = registry();
        assert!(r.signature(SignatureType::MlDsa65).is_ok());
        assert!(r.signature(SignatureType::SlhDsaSha2_128s).is_ok());
    }

    #[test]
    fn registry_is_idempotent_across_calls() {
        let a = registry() as *const Registry;
        let b = registry() as *const Registry;
        assert_eq!(a, b);
    }
}
