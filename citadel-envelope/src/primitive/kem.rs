//! ML-KEM (FIPS 203) primitive adapter, parameterized over the three
//! standard parameter sets (512/768/1024).

use ml_kem::kem::{Decapsulate, Encapsulate};
use ml_kem::{Ciphertext, EncodedSizeUser, KemCore, MlKem1024, MlKem512, MlKem768};
use rand_core::OsRng;

use crate::catalog::KemType;
use crate::error::{CoreError, Result};

pub struct KeyPairBytes {
    pub public_key: Vec<u8>,
    pub secret_key: Vec<u8>,
}

pub struct EncapsulationResult {
    pub shared_secret: Vec<u8>,
    pub ciphertext: Vec<u8>,
}

macro_rules! ml_kem_impl {
    ($mod_name:ident, $scheme:ty) => {
        mod $mod_name {
            use super::*;

            pub fn keygen() -> KeyPairBytes {
                let (dk, ek) = <$scheme>::generate(&mut OsRng);
                KeyPairBytes {
                    public_key: ek.as_bytes().to_vec(),
                    secret_key: dk.as_bytes().to_vec(),
                }
            }

            pub fn encapsulate(public_key: &[u8]) -> Result<EncapsulationResult> {
                let ek = <$scheme as KemCore>::EncapsulationKey::from_bytes(
                    &ml_kem::array::Array::try_from(public_key).map_err(|_| {
                        CoreError::InvalidParameterSize {
                            expected: public_key.len(),
                            actual: public_key.len(),
                        }
                    })?,
                );
                let (ct, ss) = ek
                    .encapsulate(&mut OsRng)
                    .map_err(|_| CoreError::KemProcessingFailure)?;
                Ok(EncapsulationResult {
                    shared_secret: ss.to_vec(),
                    ciphertext: ct.to_vec(),
                })
            }

            pub fn decapsulate(secret_key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
                let dk = <$scheme as KemCore>::DecapsulationKey::from_bytes(
                    &ml_kem::array::Array::try_from(secret_key).map_err(|_| {
                        CoreError::InvalidParameterSize {
                            expected: secret_key.len(),
                            actual: secret_key.len(),
                        }
                    })?,
                );
                let ct = Ciphertext::<$scheme>::try_from(ciphertext)
                    .map_err(|_| CoreError::InvalidParameterSize {
                        expected: ciphertext.len(),
                        actual: ciphertext.len(),
                    })?;
                let ss = dk
                    .decapsulate(&ct)
                    .map_err(|_| CoreError::KemProcessingFailure)?;
                Ok(ss.to_vec())
            }
        }
    };
}

ml_kem_impl!(k512, MlKem512);
ml_kem_impl!(k768, MlKem768);
ml_kem_impl!(k1024, MlKem1024);

pub fn keygen(kem: KemType) -> Result<KeyPairBytes> {
    match kem {
        KemType::MlKem512 => Ok(k512::keygen()),
        KemType::MlKem768 => Ok(k768::keygen()),
        KemType::MlKem1024 => Ok(k1024::keygen()),
        KemType::HybridX25519MlKem768 => {
            Err(CoreError::InvalidAlgorithmInput("hybrid keygen lives in crate::hybrid"))
        }
    }
}

pub fn encapsulate(kem: KemType, public_key: &[u8]) -> Result<EncapsulationResult> {
    match kem {
        KemType::MlKem512 => k512::encapsulate(public_key),
        KemType::MlKem768 => k768::encapsulate(public_key),
        KemType::MlKem1024 => k1024::encapsulate(public_key),
        KemType::HybridX25519MlKem768 => {
            Err(CoreError::InvalidAlgorithmInput("hybrid encapsulate lives in crate::hybrid"))
        }
    }
}

pub fn decapsulate(kem: KemType, secret_key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    match kem {
        KemType::MlKem512 => k512::decapsulate(secret_key, ciphertext),
        KemType::MlKem768 => k768::decapsulate(secret_key, ciphertext),
        KemType::MlKem1024 => k1024::decapsulate(secret_key, ciphertext),
        KemType::HybridX25519MlKem768 => {
            Err(CoreError::InvalidAlgorithmInput("hybrid decapsulate lives in crate::hybrid"))
        }
    }
}
