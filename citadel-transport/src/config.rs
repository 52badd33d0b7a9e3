//! Reactor configuration, loaded from environment variables.
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `CITADEL_TRANSPORT_PORT` | Listen port | `7443` |
//! | `CITADEL_TRANSPORT_BIND_ADDR` | Listen address | `0.0.0.0` |
//! | `CITADEL_TRANSPORT_HANDSHAKE_TIMEOUT_SECS` | Handshake budget per participant | `10` |
//! | `CITADEL_TRANSPORT_SESSION_TIMEOUT_SECS` | Max session lifetime | `86400` |
//! | `CITADEL_TRANSPORT_IDLE_TIMEOUT_SECS` | Idle session reap interval | `900` |
//! | `CITADEL_TRANSPORT_LOG_FORMAT` | `json` for structured logs, else pretty | `pretty` |

use std::time::Duration;

#[derive(Clone, Debug)]
pub struct ReactorConfig {
    pub bind_addr: String,
    pub port: u16,
    pub handshake_timeout: Duration,
    pub session_timeout: Duration,
    pub idle_timeout: Duration,
}

impl ReactorConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("CITADEL_TRANSPORT_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("CITADEL_TRANSPORT_PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(7443),
            handshake_timeout: Duration::from_secs(
                std::env::var("CITADEL_TRANSPORT_HANDSHAKE_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(10),
            ),
            session_timeout: Duration::from_secs(
                std::env::var("CITADEL_TRANSPORT_SESSION_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(86_400),
            ),
            idle_timeout: Duration::from_secs(
                std::env::var("CITADEL_TRANSPORT_IDLE_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(900),
            ),
        }
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

impl Default for ReactorConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

pub fn log_format() -> String {
    std::env::var("CITADEL_TRANSPORT_LOG_FORMAT").unwrap_or_else(|_| "pretty".into())
}
