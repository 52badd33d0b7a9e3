//! Block-cipher primitive adapters: AES and ARIA under ECB/CBC/CFB/OFB/CTR.

use aes::{Aes128, Aes192, Aes256};
use aria::{Aria128, Aria192, Aria256};
use cipher::{
    block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyInit, KeyIvInit, StreamCipher,
};

use crate::catalog::{CipherType, Mode, Padding};
use crate::error::{CoreError, Result};

type CbcEnc<C> = cbc::Encryptor<C>;
type CbcDec<C> = cbc::Decryptor<C>;
type CfbEnc<C> = cfb_mode::Encryptor<C>;
type CfbDec<C> = cfb_mode::Decryptor<C>;
type OfbStream<C> = ofb::Ofb<C>;
type CtrStream<C> = ctr::Ctr128BE<C>;
type EcbEnc<C> = ecb::Encryptor<C>;
type EcbDec<C> = ecb::Decryptor<C>;

macro_rules! dispatch_block {
    ($cipher:expr, $mode:expr, $key:expr, $iv:expr, $padding:expr, $input:expr, $direction:ident) => {
        match $cipher {
            CipherType::Aes128 => block_op::<Aes128>($mode, $key, $iv, $padding, $input, Direction::$direction),
            CipherType::Aes192 => block_op::<Aes192>($mode, $key, $iv, $padding, $input, Direction::$direction),
            CipherType::Aes256 => block_op::<Aes256>($mode, $key, $iv, $padding, $input, Direction::$direction),
            CipherType::Aria128 => block_op::<Aria128>($mode, $key, $iv, $padding, $input, Direction::$direction),
            CipherType::Aria192 => block_op::<Aria192>($mode, $key, $iv, $padding, $input, Direction::$direction),
            CipherType::Aria256 => block_op::<Aria256>($mode, $key, $iv, $padding, $input, Direction::$direction),
            CipherType::ChaCha20 => Err(CoreError::InvalidAlgorithmInput("not a block cipher")),
        }
    };
}

#[derive(Clone, Copy)]
enum Direction {
    Encrypt,
    Decrypt,
}

pub fn encrypt(
    cipher: CipherType,
    mode: Mode,
    key: &[u8],
    iv: &[u8],
    padding: Padding,
    plaintext: &[u8],
) -> Result<Vec<u8>> {
    require_block_cipher_padding(padding)?;
    dispatch_block!(cipher, mode, key, iv, padding, plaintext, Encrypt)
}

pub fn decrypt(
    cipher: CipherType,
    mode: Mode,
    key: &[u8],
    iv: &[u8],
    padding: Padding,
    ciphertext: &[u8],
) -> Result<Vec<u8>> {
    require_block_cipher_padding(padding)?;
    dispatch_block!(cipher, mode, key, iv, padding, ciphertext, Decrypt)
}

fn require_block_cipher_padding(padding: Padding) -> Result<()> {
    if padding.is_block_cipher_compatible() {
        Ok(())
    } else {
        Err(CoreError::InvalidAlgorithmInput("padding scheme is RSA-only, unsupported for block ciphers"))
    }
}

fn block_op<C>(
    mode: Mode,
    key: &[u8],
    iv: &[u8],
    padding: Padding,
    input: &[u8],
    direction: Direction,
) -> Result<Vec<u8>>
where
    C: cipher::BlockCipher
        + cipher::BlockSizeUser
        + cipher::KeySizeUser
        + KeyInit
        + Clone
        + 'static,
{
    match mode {
        Mode::Ecb => match (direction, padding) {
            (Direction::Encrypt, Padding::Pkcs7 | Padding::Pkcs5) => {
                let enc = EcbEnc::<C>::new_from_slice(key)
                    .map_err(|_| CoreError::InvalidParameterSize { expected: 0, actual: key.len() })?;
                Ok(enc.encrypt_padded_vec_mut::<Pkcs7>(input))
            }
            (Direction::Encrypt, Padding::No) => {
                let enc = EcbEnc::<C>::new_from_slice(key)
                    .map_err(|_| CoreError::InvalidParameterSize { expected: 0, actual: key.len() })?;
                let mut buf = input.to_vec();
                enc.encrypt_padded_mut::<cipher::block_padding::NoPadding>(&mut buf, input.len())
                    .map_err(|_| CoreError::InvalidAlgorithmInput("block length not a multiple of block size"))?;
                Ok(buf)
            }
            (Direction::Decrypt, Padding::Pkcs7 | Padding::Pkcs5) => {
                let dec = EcbDec::<C>::new_from_slice(key)
                    .map_err(|_| CoreError::InvalidParameterSize { expected: 0, actual: key.len() })?;
                dec.decrypt_padded_vec_mut::<Pkcs7>(input)
                    .map_err(|_| CoreError::AuthenticationFailed)
            }
            (Direction::Decrypt, Padding::No) => {
                let dec = EcbDec::<C>::new_from_slice(key)
                    .map_err(|_| CoreError::InvalidParameterSize { expected: 0, actual: key.len() })?;
                let mut buf = input.to_vec();
                dec.decrypt_padded_mut::<cipher::block_padding::NoPadding>(&mut buf)
                    .map_err(|_| CoreError::AuthenticationFailed)?;
                Ok(buf)
            }
            (_, Padding::Iso7816 | Padding::Iso10126 | Padding::ZeroByte) => {
                Err(CoreError::InvalidAlgorithmInput("padding scheme not implemented for block ciphers"))
            }
            (_, Padding::Pkcs1 | Padding::OaepAndMgf1) => unreachable!("rejected by require_block_cipher_padding"),
        },
        Mode::Cbc => {
            require_iv(iv, 16)?;
            match (direction, padding) {
                (Direction::Encrypt, _) => {
                    let enc = CbcEnc::<C>::new_from_slices(key, iv)
                        .map_err(|_| CoreError::InvalidParameterSize { expected: 0, actual: key.len() })?;
                    Ok(enc.encrypt_padded_vec_mut::<Pkcs7>(input))
                }
                (Direction::Decrypt, _) => {
                    let dec = CbcDec::<C>::new_from_slices(key, iv)
                        .map_err(|_| CoreError::InvalidParameterSize { expected: 0, actual: key.len() })?;
                    dec.decrypt_padded_vec_mut::<Pkcs7>(input)
                        .map_err(|_| CoreError::AuthenticationFailed)
                }
            }
        }
        Mode::Cfb => {
            require_iv(iv, 16)?;
            let mut buf = input.to_vec();
            match direction {
                Direction::Encrypt => {
                    let mut enc = CfbEnc::<C>::new_from_slices(key, iv)
                        .map_err(|_| CoreError::InvalidParameterSize { expected: 0, actual: key.len() })?;
                    enc.encrypt(&mut buf);
                }
                Direction::Decrypt => {
                    let mut dec = CfbDec::<C>::new_from_slices(key, iv)
                        .map_err(|_| CoreError::InvalidParameterSize { expected: 0, actual: key.len() })?;
                    dec.decrypt(&mut buf);
                }
            }
            Ok(buf)
        }
        Mode::Ofb => {
            require_iv(iv, 16)?;
            let mut buf = input.to_vec();
            let mut stream = OfbStream::<C>::new_from_slices(key, iv)
                .map_err(|_| CoreError::InvalidParameterSize { expected: 0, actual: key.len() })?;
            stream.apply_keystream(&mut buf);
            Ok(buf)
        }
        Mode::Ctr => {
            require_iv(iv, 16)?;
            let mut buf = input.to_vec();
            let mut stream = CtrStream::<C>::new_from_slices(key, iv)
                .map_err(|_| CoreError::InvalidParameterSize { expected: 0, actual: key.len() })?;
            stream.apply_keystream(&mut buf);
            Ok(buf)
        }
        Mode::AeadGcm | Mode::AeadCcm | Mode::AeadChaCha20Poly1305 => {
            Err(CoreError::InvalidAlgorithmInput("aead mode handled by primitive::aead"))
        }
    }
}

fn require_iv(iv: &[u8], expected: usize) -> Result<()> {
    if iv.len() != expected {
        return Err(CoreError::InvalidIvLength { expected, actual: iv.len() });
    }
    Ok(())
}
