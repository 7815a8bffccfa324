//! Error types for the probe library.

use std::path::PathBuf;

use thiserror::Error;

use crate::protocol::ProtocolError;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Failed to read config file {0}: {1}")]
    ConfigRead(PathBuf, std::io::Error),

    #[error("Failed to parse config file {0}: {1}")]
    ConfigParse(PathBuf, toml::de::Error),

    #[error("Invalid server URL {0}: {1}")]
    InvalidUrl(String, url::ParseError),

    #[error("Connection failed: {0}")]
    Connect(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Connection closed before the Engine.IO handshake")]
    HandshakeIncomplete,

    #[error("Login request failed: {0}")]
    LoginRequest(#[from] reqwest::Error),

    #[error("Login rejected with status {status}: {body}")]
    LoginRejected { status: u16, body: String },
}
