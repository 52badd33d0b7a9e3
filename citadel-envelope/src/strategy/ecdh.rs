use crate::arena::RuntimeHint;
use crate::error::Result;
use crate::primitive::ecdh as ecdh_primitive;
use crate::sdc::Sdc;

use super::traits::EcdhStrategy;

pub struct X25519Ecdh;

impl EcdhStrategy for X25519Ecdh {
    fn keygen(&self) -> Result<(Sdc, Sdc)> {
        let kp = ecdh_primitive::keygen();
        let public = Sdc::from_owned(kp.public_key.to_vec(), RuntimeHint::Confined)?;
        let secret = Sdc::from_owned(kp.secret_key.to_vec(), RuntimeHint::Confined)?;
        Ok((public, secret))
    }

    fn agree(&self, secret_key: &Sdc, peer_public_key: &Sdc) -> Result<Sdc> {
        let sk_bytes = secret_key.as_byte_buffer()?;
        let peer_bytes = peer_public_key.as_byte_buffer()?;
        let shared = ecdh_primitive::agree(&sk_bytes, &peer_bytes)?;
        Sdc::from_owned(shared.to_vec(), RuntimeHint::Confined)
    }
}
