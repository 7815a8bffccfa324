//! Configuration management for the queue probe.
//!
//! Settings come from an optional TOML file and are then overridden by
//! command-line arguments. A missing file simply means defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;

use crate::cli::CliArgs;
use crate::error::ProbeError;
use crate::events::GameType;
use crate::protocol::{DEFAULT_NAMESPACE, SOCKET_IO_PATH};

/// Server the probe talks to when nothing else is configured.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5051";

/// Placeholder credential used when no token or login is configured.
pub const DEFAULT_TOKEN: &str = "your-test-token-here";

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_engine_path() -> String {
    SOCKET_IO_PATH.to_string()
}

fn default_token() -> String {
    DEFAULT_TOKEN.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_login_path() -> String {
    "/api/auth/login".to_string()
}

fn default_window_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    10
}

/// Probe configuration loaded from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Where to connect
    #[serde(default)]
    pub server: ServerSettings,
    /// Credentials
    #[serde(default)]
    pub auth: AuthSettings,
    /// What to request and for how long to listen
    #[serde(default)]
    pub probe: ProbeSettings,
    /// Log output
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Matchmaking server location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Base URL (`http`, `https`, `ws` or `wss`). Only scheme, host and
    /// port are used; a path here is ignored, set `path` or `namespace`
    /// instead.
    #[serde(default = "default_server_url")]
    pub url: String,
    /// Engine.IO endpoint path on the server
    #[serde(default = "default_engine_path")]
    pub path: String,
    /// Socket.IO namespace to join
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            url: default_server_url(),
            path: default_engine_path(),
            namespace: default_namespace(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    /// Bearer token sent in the Socket.IO CONNECT packet
    #[serde(default = "default_token")]
    pub token: String,
    /// When set, a token is fetched from the login endpoint instead
    #[serde(default)]
    pub login: Option<LoginSettings>,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            token: default_token(),
            login: None,
        }
    }
}

/// Credentials for the HTTP login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginSettings {
    /// Username or email
    pub identifier: String,
    pub password: String,
    /// Endpoint path relative to the server URL
    #[serde(default = "default_login_path")]
    pub path: String,
    #[serde(default = "default_request_timeout_secs")]
    pub timeout_secs: u64,
}

impl LoginSettings {
    pub fn new(identifier: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            password: password.into(),
            path: default_login_path(),
            timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeSettings {
    /// Game type carried by the `joinQueue` request
    #[serde(default)]
    pub game_type: GameType,
    /// Seconds to keep the connection open before closing it
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            game_type: GameType::default(),
            window_secs: default_window_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Whether to output logs in JSON format
    #[serde(default)]
    pub json_format: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
        }
    }
}

impl ProbeConfig {
    /// Loads configuration from a TOML file.
    ///
    /// A missing file is not an error: the defaults are returned and nothing
    /// is written to disk.
    ///
    /// # Errors
    ///
    /// [`ProbeError::ConfigRead`] if the file exists but cannot be read,
    /// [`ProbeError::ConfigParse`] if it is not valid TOML for this schema.
    pub async fn load_from_file(path: &Path) -> Result<Self, ProbeError> {
        if !path.exists() {
            info!("Configuration file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ProbeError::ConfigRead(path.to_path_buf(), e))?;
        toml::from_str(&content).map_err(|e| ProbeError::ConfigParse(path.to_path_buf(), e))
    }

    /// Applies command-line overrides on top of the file settings.
    pub fn apply_cli(&mut self, args: &CliArgs) {
        if let Some(url) = &args.url {
            self.server.url = url.clone();
        }
        if let Some(token) = &args.token {
            self.auth.token = token.clone();
        }
        if let Some(identifier) = &args.login {
            let password = args.password.clone().unwrap_or_default();
            match &mut self.auth.login {
                Some(login) => {
                    login.identifier = identifier.clone();
                    login.password = password;
                }
                None => self.auth.login = Some(LoginSettings::new(identifier.clone(), password)),
            }
        }
        if let Some(game_type) = args.game_type {
            self.probe.game_type = game_type;
        }
        if let Some(window) = args.window {
            self.probe.window_secs = window;
        }
        if let Some(level) = &args.log_level {
            self.logging.level = level.clone();
        }
        if args.json_logs {
            self.logging.json_format = true;
        }
    }

    /// Parsed server base URL.
    pub fn server_url(&self) -> Result<Url, ProbeError> {
        Url::parse(&self.server.url).map_err(|e| ProbeError::InvalidUrl(self.server.url.clone(), e))
    }

    pub fn window(&self) -> Duration {
        Duration::from_secs(self.probe.window_secs)
    }

    /// Validates the configuration for consistency and correctness.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the configuration is valid, or an error string describing
    /// the issue.
    pub fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.server.url)
            .map_err(|e| format!("Invalid server URL: {} ({e})", self.server.url))?;
        if !matches!(url.scheme(), "http" | "https" | "ws" | "wss") {
            return Err(format!(
                "Unsupported server URL scheme: {}. Must be http, https, ws or wss",
                url.scheme()
            ));
        }

        if !self.server.path.starts_with('/') {
            return Err(format!(
                "Server path must start with '/': {}",
                self.server.path
            ));
        }

        if !self.server.namespace.starts_with('/') {
            return Err(format!(
                "Namespace must start with '/': {}",
                self.server.namespace
            ));
        }

        match &self.auth.login {
            Some(login) => {
                if login.identifier.trim().is_empty() {
                    return Err("Login identifier cannot be empty".to_string());
                }
                if login.timeout_secs == 0 {
                    return Err("Login timeout must be greater than zero".to_string());
                }
            }
            None => {
                if self.auth.token.trim().is_empty() {
                    return Err("Auth token cannot be empty".to_string());
                }
            }
        }

        if self.probe.window_secs == 0 {
            return Err("Probe window must be at least one second".to_string());
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(format!(
                "Invalid log level: {}. Must be one of: {valid_levels:?}",
                &self.logging.level
            ));
        }

        Ok(())
    }
}
