use crate::arena::RuntimeHint;
use crate::catalog::KemType;
use crate::error::Result;
use crate::primitive::kem as kem_primitive;
use crate::sdc::Sdc;

use super::traits::KemStrategy;

pub struct MlKemStrategy {
    pub scheme: KemType,
}

impl MlKemStrategy {
    pub fn new(scheme: KemType) -> Self {
        Self { scheme }
    }
}

impl KemStrategy for MlKemStrategy {
    fn kem_type(&self) -> KemType {
        self.scheme
    }

    fn keygen(&self) -> Result<(Sdc, Sdc)> {
        let kp = kem_primitive::keygen(self.scheme)?;
        let public = Sdc::from_owned(kp.public_key, RuntimeHint::Confined)?;
        let secret = Sdc::from_owned(kp.secret_key, RuntimeHint::Confined)?;
        Ok((public, secret))
    }

    fn encapsulate(&self, public_key: &Sdc) -> Result<Sdc> {
        let pk_bytes = public_key.as_byte_buffer()?;
        let result = kem_primitive::encapsulate(self.scheme, &pk_bytes)?;
        let shared_secret = Sdc::from_owned(result.shared_secret, RuntimeHint::Confined)?;
        let ciphertext = Sdc::from_owned(result.ciphertext, RuntimeHint::Confined)?;
        shared_secret.add_container_data(ciphertext)?;
        Ok(shared_secret)
    }

    fn decapsulate(&self, secret_key: &Sdc, ciphertext: &Sdc) -> Result<Sdc> {
        let sk_bytes = secret_key.as_byte_buffer()?;
        let ct_bytes = ciphertext.as_byte_buffer()?;
        let ss = kem_primitive::decapsulate(self.scheme, &sk_bytes, &ct_bytes)?;
        Sdc::from_owned(ss, RuntimeHint::Confined)
    }
}
