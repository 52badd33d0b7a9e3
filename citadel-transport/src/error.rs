//! Error taxonomy for the transport reactor and handshake protocol.

use std::fmt;

#[derive(Debug)]
pub enum TransportError {
    /// `CLIENT_HELLO`'s advertised length was negative or exceeded the
    /// 16 KiB handshake size guard.
    HandshakeOverflow { advertised: i64, limit: usize },
    /// A participant did not complete the handshake within the configured
    /// budget.
    HandshakeTimeout,
    /// A handshake frame carried an unexpected type byte or a length prefix
    /// that does not describe the bytes that follow it.
    MalformedFrame(&'static str),
    /// The buffer holds fewer bytes than a frame's declared length — not
    /// corruption, just an incomplete read. The caller should buffer more
    /// bytes from the stream and retry the same parse.
    NeedMoreData,
    Session(citadel_session::SessionError),
    Envelope(citadel_envelope::CoreError),
    Io(std::io::Error),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HandshakeOverflow { advertised, limit } => {
                write!(f, "handshake overflow: advertised {advertised} bytes exceeds {limit} byte limit")
            }
            Self::HandshakeTimeout => write!(f, "handshake did not complete within the configured timeout"),
            Self::MalformedFrame(reason) => write!(f, "malformed handshake frame: {reason}"),
            Self::NeedMoreData => write!(f, "incomplete frame: need more bytes before this buffer can be parsed"),
            Self::Session(e) => write!(f, "session error: {e}"),
            Self::Envelope(e) => write!(f, "envelope error: {e}"),
            Self::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl std::error::Error for TransportError {}

impl From<citadel_session::SessionError> for TransportError {
    fn from(e: citadel_session::SessionError) -> Self {
        Self::Session(e)
    }
}

impl From<citadel_envelope::CoreError> for TransportError {
    fn from(e: citadel_envelope::CoreError) -> Self {
        Self::Envelope(e)
    }
}

impl From<std::io::Error> for TransportError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, TransportError>;
