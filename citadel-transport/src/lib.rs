//! Non-blocking PQC-secured transport reactor.
//!
//! This crate owns the wire-level handshake ([`handshake`], [`frame`]) and
//! the tokio accept/read/write loop ([`reactor`]) that drives
//! `citadel_session::Participant`s from HANDSHAKING to ESTABLISHED and then
//! carries AES-256-GCM-framed data records between them. Session and
//! participant lifecycle itself lives in `citadel-session`; this crate only
//! adds the bytes-on-a-socket layer on top.

pub mod config;
pub mod error;
pub mod frame;
pub mod handshake;
pub mod reactor;

pub use config::ReactorConfig;
pub use error::{Result, TransportError};
pub use reactor::Reactor;
