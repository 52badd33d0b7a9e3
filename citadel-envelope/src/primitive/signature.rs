//! Signature primitive adapters: ML-DSA (FIPS 204) and SLH-DSA (FIPS 205).
//!
//! Both families already implement the `signature` crate's `Signer`/
//! `Verifier` traits, so the adapters here only own byte (de)serialization
//! and the mapping from raw bytes to this crate's error taxonomy.

use ml_dsa::{KeyGen, MlDsa44, MlDsa65, MlDsa87};
use rand_core::OsRng;
use signature::{Keypair, RandomizedSigner, Signer, Verifier};
use slh_dsa::{
    Sha2_128f, Sha2_128s, Sha2_192s, Sha2_256s, SigningKey as SlhSigningKey,
    VerifyingKey as SlhVerifyingKey,
};

use crate::catalog::SignatureType;
use crate::error::{CoreError, Result};

pub struct KeyPairBytes {
    pub public_key: Vec<u8>,
    pub secret_key: Vec<u8>,
}

pub fn keygen(scheme: SignatureType) -> Result<KeyPairBytes> {
    match scheme {
        SignatureType::MlDsa44 => {
            let kp = MlDsa44::key_gen(&mut OsRng);
            Ok(KeyPairBytes {
                public_key: kp.verifying_key().encode().to_vec(),
                secret_key: kp.signing_key().encode().to_vec(),
            })
        }
        SignatureType::MlDsa65 => {
            let kp = MlDsa65::key_gen(&mut OsRng);
            Ok(KeyPairBytes {
                public_key: kp.verifying_key().encode().to_vec(),
                secret_key: kp.signing_key().encode().to_vec(),
            })
        }
        SignatureType::MlDsa87 => {
            let kp = MlDsa87::key_gen(&mut OsRng);
            Ok(KeyPairBytes {
                public_key: kp.verifying_key().encode().to_vec(),
                secret_key: kp.signing_key().encode().to_vec(),
            })
        }
        SignatureType::SlhDsaSha2_128s => {
            let sk = SlhSigningKey::<Sha2_128s>::new(&mut OsRng);
            let vk = sk.verifying_key();
            Ok(KeyPairBytes {
                public_key: vk.to_bytes().to_vec(),
                secret_key: sk.to_bytes().to_vec(),
            })
        }
        SignatureType::SlhDsaSha2_128f => {
            let sk = SlhSigningKey::<Sha2_128f>::new(&mut OsRng);
            let vk = sk.verifying_key();
            Ok(KeyPairBytes {
                public_key: vk.to_bytes().to_vec(),
                secret_key: sk.to_bytes().to_vec(),
            })
        }
        SignatureType::SlhDsaSha2_192s => {
            let sk = SlhSigningKey::<Sha2_192s>::new(&mut OsRng);
            let vk = sk.verifying_key();
            Ok(KeyPairBytes {
                public_key: vk.to_bytes().to_vec(),
                secret_key: sk.to_bytes().to_vec(),
            })
        }
        SignatureType::SlhDsaSha2_256s => {
            let sk = SlhSigningKey::<Sha2_256s>::new(&mut OsRng);
            let vk = sk.verifying_key();
            Ok(KeyPairBytes {
                public_key: vk.to_bytes().to_vec(),
                secret_key: sk.to_bytes().to_vec(),
            })
        }
    }
}

fn decode_ml_dsa_signing_key<P>(bytes: &[u8]) -> Result<ml_dsa::SigningKey<P>>
where
    P: ml_dsa::MlDsaParams,
{
    let encoded = ml_dsa::EncodedSigningKey::<P>::try_from(bytes)
        .map_err(|_| CoreError::InvalidAlgorithmInput("malformed ml-dsa signing key"))?;
    Ok(ml_dsa::SigningKey::<P>::decode(&encoded))
}

fn decode_ml_dsa_verifying_key<P>(bytes: &[u8]) -> Result<ml_dsa::VerifyingKey<P>>
where
    P: ml_dsa::MlDsaParams,
{
    let encoded = ml_dsa::EncodedVerifyingKey::<P>::try_from(bytes)
        .map_err(|_| CoreError::InvalidAlgorithmInput("malformed ml-dsa verifying key"))?;
    Ok(ml_dsa::VerifyingKey::<P>::decode(&encoded))
}

pub fn sign(scheme: SignatureType, secret_key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    match scheme {
        SignatureType::MlDsa44 => {
            let sk = decode_ml_dsa_signing_key::<MlDsa44>(secret_key)?;
            Ok(sk.sign(message).encode().to_vec())
        }
        SignatureType::MlDsa65 => {
            let sk = decode_ml_dsa_signing_key::<MlDsa65>(secret_key)?;
            Ok(sk.sign(message).encode().to_vec())
        }
        SignatureType::MlDsa87 => {
            let sk = decode_ml_dsa_signing_key::<MlDsa87>(secret_key)?;
            Ok(sk.sign(message).encode().to_vec())
        }
        SignatureType::SlhDsaSha2_128s => {
            let sk = SlhSigningKey::<Sha2_128s>::try_from(secret_key)
                .map_err(|_| CoreError::SignatureProcessingFailure)?;
            Ok(sk.sign_with_rng(&mut OsRng, message).to_bytes().to_vec())
        }
        SignatureType::SlhDsaSha2_128f => {
            let sk = SlhSigningKey::<Sha2_128f>::try_from(secret_key)
                .map_err(|_| CoreError::SignatureProcessingFailure)?;
            Ok(sk.sign_with_rng(&mut OsRng, message).to_bytes().to_vec())
        }
        SignatureType::SlhDsaSha2_192s => {
            let sk = SlhSigningKey::<Sha2_192s>::try_from(secret_key)
                .map_err(|_| CoreError::SignatureProcessingFailure)?;
            Ok(sk.sign_with_rng(&mut OsRng, message).to_bytes().to_vec())
        }
        SignatureType::SlhDsaSha2_256s => {
            let sk = SlhSigningKey::<Sha2_256s>::try_from(secret_key)
                .map_err(|_| CoreError::SignatureProcessingFailure)?;
            Ok(sk.sign_with_rng(&mut OsRng, message).to_bytes().to_vec())
        }
    }
}

pub fn verify(scheme: SignatureType, public_key: &[u8], message: &[u8], signature: &[u8]) -> Result<()> {
    match scheme {
        SignatureType::MlDsa44 => {
            let vk = decode_ml_dsa_verifying_key::<MlDsa44>(public_key)?;
            let sig = ml_dsa::Signature::<MlDsa44>::try_from(signature)
                .map_err(|_| CoreError::SignatureProcessingFailure)?;
            vk.verify(message, &sig).map_err(|_| CoreError::AuthenticationFailed)
        }
        SignatureType::MlDsa65 => {
            let vk = decode_ml_dsa_verifying_key::<MlDsa65>(public_key)?;
            let sig = ml_dsa::Signature::<MlDsa65>::try_from(signature)
                .map_err(|_| CoreError::SignatureProcessingFailure)?;
            vk.verify(message, &sig).map_err(|_| CoreError::AuthenticationFailed)
        }
        SignatureType::MlDsa87 => {
            let vk = decode_ml_dsa_verifying_key::<MlDsa87>(public_key)?;
            let sig = ml_dsa::Signature::<MlDsa87>::try_from(signature)
                .map_err(|_| CoreError::SignatureProcessingFailure)?;
            vk.verify(message, &sig).map_err(|_| CoreError::AuthenticationFailed)
        }
        SignatureType::SlhDsaSha2_128s => {
            let vk = SlhVerifyingKey::<Sha2_128s>::try_from(public_key)
                .map_err(|_| CoreError::SignatureProcessingFailure)?;
            let sig = slh_dsa::Signature::<Sha2_128s>::try_from(signature)
                .map_err(|_| CoreError::SignatureProcessingFailure)?;
            vk.verify(message, &sig).map_err(|_| CoreError::AuthenticationFailed)
        }
        SignatureType::SlhDsaSha2_128f => {
            let vk = SlhVerifyingKey::<Sha2_128f>::try_from(public_key)
                .map_err(|_| CoreError::SignatureProcessingFailure)?;
            let sig = slh_dsa::Signature::<Sha2_128f>::try_from(signature)
                .map_err(|_| CoreError::SignatureProcessingFailure)?;
            vk.verify(message, &sig).map_err(|_| CoreError::AuthenticationFailed)
        }
        SignatureType::SlhDsaSha2_192s => {
            let vk = SlhVerifyingKey::<Sha2_192s>::try_from(public_key)
                .map_err(|_| CoreError::SignatureProcessingFailure)?;
            let sig = slh_dsa::Signature::<Sha2_192s>::try_from(signature)
                .map_err(|_| CoreError::SignatureProcessingFailure)?;
            vk.verify(message, &sig).map_err(|_| CoreError::AuthenticationFailed)
        }
        SignatureType::SlhDsaSha2_256s => {
            let vk = SlhVerifyingKey::<Sha2_256s>::try_from(public_key)
                .map_err(|_| CoreError::SignatureProcessingFailure)?;
            let sig = slh_dsa::Signature::<Sha2_256s>::try_from(signature)
                .map_err(|_| CoreError::SignatureProcessingFailure)?;
            vk.verify(message, &sig).map_err(|_| CoreError::AuthenticationFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mldsa65_sign_and_verify_roundtrip() {
        let kp = keygen(SignatureType::MlDsa65).unwrap();
        let msg = b"hybrid handshake transcript";
        let sig = sign(SignatureType::MlDsa65, &kp.secret_key, msg).unwrap();
        verify(SignatureType::MlDsa65, &kp.public_key, msg, &sig).unwrap();
    }

    #[test]
    fn mldsa65_rejects_tampered_message() {
        let kp = keygen(SignatureType::MlDsa65).unwrap();
        let sig = sign(SignatureType::MlDsa65, &kp.secret_key, b"original").unwrap();
        assert!(verify(SignatureType::MlDsa65, &kp.public_key, b"tampered", &sig).is_err());
    }

    #[test]
    fn slhdsa_128s_sign_and_verify_roundtrip() {
        let kp = keygen(SignatureType::SlhDsaSha2_128s).unwrap();
        let msg = b"stateless hash-based signature";
        let sig = sign(SignatureType::SlhDsaSha2_128s, &kp.secret_key, msg).unwrap();
        verify(SignatureType::SlhDsaSha2_128s, &kp.public_key, msg, &sig).unwrap();
    }
}
