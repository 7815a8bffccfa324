//! Command-line argument parsing.
//!
//! Every option overrides the matching setting from the configuration file.

use clap::Parser;
use std::path::PathBuf;

use crate::events::GameType;

/// Matchmaking queue smoke test.
///
/// Connects to the game server, asks to join a queue and logs every
/// notification received until the listening window closes.
#[derive(Parser, Debug, Clone)]
#[command(name = "queue-probe", author, version, about, long_about = None)]
pub struct CliArgs {
    /// Configuration file path
    ///
    /// Optional; when the file does not exist the built-in defaults are used.
    #[arg(short, long, default_value = "queue-probe.toml")]
    pub config: PathBuf,

    /// Server base URL (e.g. http://localhost:5051)
    #[arg(short, long)]
    pub url: Option<String>,

    /// Bearer token sent with the connection
    #[arg(short, long)]
    pub token: Option<String>,

    /// Game type to queue for
    #[arg(short, long)]
    pub game_type: Option<GameType>,

    /// Seconds to listen before closing the connection
    #[arg(short, long)]
    pub window: Option<u64>,

    /// Log in with this username or email to obtain a token first
    #[arg(long, value_name = "IDENTIFIER", requires = "password")]
    pub login: Option<String>,

    /// Password for --login
    #[arg(long)]
    pub password: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Output logs in JSON format
    #[arg(long)]
    pub json_logs: bool,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            config: PathBuf::from("queue-probe.toml"),
            url: None,
            token: None,
            game_type: None,
            window: None,
            login: None,
            password: None,
            log_level: None,
            json_logs: false,
        }
    }
}
