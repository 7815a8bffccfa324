//! # Queue Probe
//!
//! Smoke test for the matchmaking server. A probe run opens a single
//! Socket.IO connection, authenticates with a bearer token, asks to join the
//! queue for one game type and logs every notification that arrives within
//! a fixed window, each with a pass/fail marker. When the window closes the
//! connection is released and the run ends.
//!
//! ## Flow
//!
//! 1. Load [`ProbeConfig`] (TOML file, then CLI overrides)
//! 2. Optionally fetch a token from the login endpoint ([`login::fetch_token`])
//! 3. Run a [`ProbeSession`] until the window expires or a shutdown signal
//!    arrives
//! 4. Inspect the returned [`ProbeReport`]
//!
//! There is no retry or reconnection: a connection error is
//! logged once and the run still waits out its window.

pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod login;
pub mod protocol;
pub mod session;
pub mod signals;

pub use cli::CliArgs;
pub use config::{LoginSettings, ProbeConfig};
pub use error::ProbeError;
pub use events::{GameType, Notification, Outcome};
pub use session::{ProbeReport, ProbeSession};
