//! Handshake frame encoding: `type(1) || payload`, with length-prefixed
//! fields as 4-byte big-endian signed integers.
//!
//! `parse_client_hello`/`parse_server_hello` distinguish a genuinely
//! incomplete buffer from a malformed one: a buffer that is shorter than a
//! field's declared length returns [`TransportError::NeedMoreData`] rather
//! than an error, so a caller accumulating bytes off a growing TCP buffer
//! can tell "wait for more" apart from "tear the connection down". A
//! negative or over-limit length prefix, or an unrecognized message type,
//! is genuine corruption and returns a different error variant. The live
//! reactor does not drive this incrementally — it reads each frame's exact
//! length with `read_exact` before parsing — but any caller that buffers
//! incoming bytes itself can retry on `NeedMoreData` without losing data.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{Result, TransportError};

pub const HANDSHAKE_SIZE_LIMIT: usize = 16 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum HandshakeMessageType {
    ClientHello = 0x01,
    ServerHello = 0x02,
    Certificate = 0x03,
    CertificateVerify = 0x04,
    Finished = 0x05,
    KeyUpdate = 0x06,
    Alert = 0x07,
}

impl HandshakeMessageType {
    pub fn from_byte(b: u8) -> Result<Self> {
        match b {
            0x01 => Ok(Self::ClientHello),
            0x02 => Ok(Self::ServerHello),
            0x03 => Ok(Self::Certificate),
            0x04 => Ok(Self::CertificateVerify),
            0x05 => Ok(Self::Finished),
            0x06 => Ok(Self::KeyUpdate),
            0x07 => Ok(Self::Alert),
            _ => Err(TransportError::MalformedFrame("unknown handshake message type")),
        }
    }
}

/// Returns `None` if `buf` does not yet hold a complete frame; the caller
/// should wait for more bytes and retry without having consumed anything.
pub fn try_parse_frame(buf: &[u8]) -> Option<(HandshakeMessageType, &[u8])> {
    let msg_type = HandshakeMessageType::from_byte(*buf.first()?).ok()?;
    Some((msg_type, &buf[1..]))
}

fn read_len_prefixed<'a>(cursor: &mut &'a [u8]) -> Result<&'a [u8]> {
    if cursor.len() < 4 {
        return Err(TransportError::NeedMoreData);
    }
    let len = i32::from_be_bytes(cursor[..4].try_into().unwrap());
    if len < 0 || len as usize > HANDSHAKE_SIZE_LIMIT {
        return Err(TransportError::HandshakeOverflow { advertised: len as i64, limit: HANDSHAKE_SIZE_LIMIT });
    }
    let len = len as usize;
    if cursor.len() < 4 + len {
        return Err(TransportError::NeedMoreData);
    }
    let field = &cursor[4..4 + len];
    *cursor = &cursor[4 + len..];
    Ok(field)
}

pub fn encode_client_hello(client_public_key: &[u8]) -> Bytes {
    let mut out = BytesMut::with_capacity(1 + 4 + client_public_key.len());
    out.put_u8(HandshakeMessageType::ClientHello as u8);
    out.put_i32(client_public_key.len() as i32);
    out.put_slice(client_public_key);
    out.freeze()
}

/// Returns the client's public key. Callers have already checked the
/// frame's type byte via [`try_parse_frame`].
pub fn parse_client_hello(payload: &[u8]) -> Result<Vec<u8>> {
    let mut cursor = payload;
    let public_key = read_len_prefixed(&mut cursor)?;
    Ok(public_key.to_vec())
}

pub fn encode_server_hello(server_public_key: &[u8], encap_result: &[u8]) -> Bytes {
    let mut out = BytesMut::with_capacity(1 + 8 + server_public_key.len() + encap_result.len());
    out.put_u8(HandshakeMessageType::ServerHello as u8);
    out.put_i32(server_public_key.len() as i32);
    out.put_slice(server_public_key);
    out.put_i32(encap_result.len() as i32);
    out.put_slice(encap_result);
    out.freeze()
}

pub fn parse_server_hello(payload: &[u8]) -> Result<(Vec<u8>, Vec<u8>)> {
    let mut cursor = payload;
    let server_public_key = read_len_prefixed(&mut cursor)?.to_vec();
    let encap_result = read_len_prefixed(&mut cursor)?.to_vec();
    Ok((server_public_key, encap_result))
}

pub fn encode_finished() -> Bytes {
    Bytes::from_static(&[HandshakeMessageType::Finished as u8])
}

/// Data-phase record: `nonce(12) || ciphertext`. The explicit per-record
/// nonce trades 12 bytes/record for robustness against reordered delivery
/// (see the crate-level design notes).
pub fn encode_data_record(nonce: &[u8], ciphertext: &[u8]) -> Bytes {
    let mut out = BytesMut::with_capacity(nonce.len() + ciphertext.len());
    out.put_slice(nonce);
    out.put_slice(ciphertext);
    out.freeze()
}

pub fn parse_data_record(record: &[u8]) -> Result<(&[u8], &[u8])> {
    if record.len() < 12 {
        return Err(TransportError::MalformedFrame("data record shorter than nonce"));
    }
    Ok(record.split_at(12))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_hello_roundtrips() {
        let key = vec![0xAAu8; 64];
        let encoded = encode_client_hello(&key);
        let (msg_type, payload) = try_parse_frame(&encoded).unwrap();
        assert_eq!(msg_type, HandshakeMessageType::ClientHello);
        assert_eq!(parse_client_hello(payload).unwrap(), key);
    }

    #[test]
    fn server_hello_roundtrips() {
        let pk = vec![0xBBu8; 1216];
        let encap = vec![0xCCu8; 1120];
        let encoded = encode_server_hello(&pk, &encap);
        let (msg_type, payload) = try_parse_frame(&encoded).unwrap();
        assert_eq!(msg_type, HandshakeMessageType::ServerHello);
        let (got_pk, got_encap) = parse_server_hello(payload).unwrap();
        assert_eq!(got_pk, pk);
        assert_eq!(got_encap, encap);
    }

    #[test]
    fn oversized_length_prefix_is_rejected_as_overflow() {
        let mut payload = BytesMut::new();
        payload.put_i32((HANDSHAKE_SIZE_LIMIT as i32) + 1);
        payload.put_slice(&vec![0u8; 16]);
        let err = parse_client_hello(&payload).unwrap_err();
        assert!(matches!(err, TransportError::HandshakeOverflow { .. }));
    }

    #[test]
    fn negative_length_prefix_is_rejected() {
        let mut payload = BytesMut::new();
        payload.put_i32(-1);
        let err = parse_client_hello(&payload).unwrap_err();
        assert!(matches!(err, TransportError::HandshakeOverflow { .. }));
    }

    #[test]
    fn truncated_frame_reports_need_more_data_not_malformed() {
        let mut payload = BytesMut::new();
        payload.put_i32(64);
        payload.put_slice(&[0u8; 10]); // declared 64 bytes, only 10 present
        let err = parse_client_hello(&payload).unwrap_err();
        assert!(matches!(err, TransportError::NeedMoreData));
    }

    #[test]
    fn truncated_length_prefix_reports_need_more_data() {
        let payload = [0u8; 2]; // fewer than the 4 bytes a length prefix needs
        let err = parse_client_hello(&payload).unwrap_err();
        assert!(matches!(err, TransportError::NeedMoreData));
    }

    #[test]
    fn growing_buffer_eventually_parses_once_complete() {
        let key = vec![0xEEu8; 40];
        let encoded = encode_client_hello(&key);
        let (_, full_payload) = try_parse_frame(&encoded).unwrap();

        for cut in 0..full_payload.len() {
            let partial = &full_payload[..cut];
            assert!(matches!(parse_client_hello(partial), Err(TransportError::NeedMoreData)));
        }
        assert_eq!(parse_client_hello(full_payload).unwrap(), key);
    }

    #[test]
    fn data_record_roundtrips() {
        let nonce = [1u8; 12];
        let ciphertext = vec![2u8; 32];
        let record = encode_data_record(&nonce, &ciphertext);
        let (got_nonce, got_ct) = parse_data_record(&record).unwrap();
        assert_eq!(got_nonce, nonce);
        assert_eq!(got_ct, ciphertext);
    }
}
