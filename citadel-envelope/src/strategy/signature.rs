use crate::arena::RuntimeHint;
use crate::catalog::SignatureType;
use crate::error::Result;
use crate::primitive::signature as sig_primitive;
use crate::sdc::Sdc;

use super::traits::SignatureStrategy;

pub struct MlDsaSignature {
    pub scheme: SignatureType,
}

impl MlDsaSignature {
    pub fn new(scheme: SignatureType) -> Self {
        Self { scheme }
    }
}

impl SignatureStrategy for MlDsaSignature {
    fn signature_type(&self) -> SignatureType {
        self.scheme
    }

    fn keygen(&self) -> Result<(Sdc, Sdc)> {
        let kp = sig_primitive::keygen(self.scheme)?;
        let public = Sdc::from_owned(kp.public_key, RuntimeHint::Confined)?;
        let secret = Sdc::from_owned(kp.secret_key, RuntimeHint::Confined)?;
        Ok((public, secret))
    }

    fn sign(&self, secret_key: &Sdc, message: &[u8]) -> Result<Sdc> {
        let sk_bytes = secret_key.as_byte_buffer()?;
        let sig = sig_primitive::sign(self.scheme, &sk_bytes, message)?;
        Sdc::from_owned(sig, RuntimeHint::Confined)
    }

    fn verify(&self, public_key: &Sdc, message: &[u8], signature: &Sdc) -> Result<bool> {
        let pk_bytes = public_key.as_byte_buffer()?;
        let sig_bytes = signature.as_byte_buffer()?;
        match sig_primitive::verify(self.scheme, &pk_bytes, message, &sig_bytes) {
            Ok(()) => Ok(true),
            Err(crate::error::CoreError::AuthenticationFailed) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

pub struct SlhDsaSignature {
    pub scheme: SignatureType,
}

impl SlhDsaSignature {
    pub fn new(scheme: SignatureType) -> Self {
        Self { scheme }
    }
}

impl SignatureStrategy for SlhDsaSignature {
    fn signature_type(&self) -> SignatureType {
        self.scheme
    }

    fn keygen(&self) -> Result<(Sdc, Sdc)> {
        let kp = sig_primitive::keygen(self.scheme)?;
        let public = Sdc::from_owned(kp.public_key, RuntimeHint::Confined)?;
        let secret = Sdc::from_owned(kp.secret_key, RuntimeHint::Confined)?;
        Ok((public, secret))
    }

    fn sign(&self, secret_key: &Sdc, message: &[u8]) -> Result<Sdc> {
        let sk_bytes = secret_key.as_byte_buffer()?;
        let sig = sig_primitive::sign(self.scheme, &sk_bytes, message)?;
        Sdc::from_owned(sig, RuntimeHint::Confined)
    }

    fn verify(&self, public_key: &Sdc, message: &[u8], signature: &Sdc) -> Result<bool> {
        let pk_bytes = public_key.as_byte_buffer()?;
        let sig_bytes = signature.as_byte_buffer()?;
        match sig_primitive::verify(self.scheme, &pk_bytes, message, &sig_bytes) {
            Ok(()) => Ok(true),
            Err(crate::error::CoreError::AuthenticationFailed) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
