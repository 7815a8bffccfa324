//! Interrupt handling so a probe run can be cut short cleanly.
//!
//! The probe never exits straight from a signal: the signal only ends the
//! listening window, after which the session still leaves the namespace and
//! closes the WebSocket.

use std::io;

use tokio::signal;
use tracing::info;

/// The termination request that ended the wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    Interrupt,
    Terminate,
}

impl ShutdownSignal {
    pub fn name(&self) -> &'static str {
        match self {
            ShutdownSignal::Interrupt => "SIGINT",
            ShutdownSignal::Terminate => "SIGTERM",
        }
    }
}

/// Waits for the process to be asked to stop.
///
/// # Platform Support
///
/// * **Unix platforms**: SIGINT (Ctrl+C) or SIGTERM
/// * **Windows**: Ctrl+C, reported as [`ShutdownSignal::Interrupt`]
///
/// # Returns
///
/// The signal that arrived, or an error if the handlers could not be
/// installed. Callers that cannot install handlers should keep running
/// until their own deadline instead of stopping.
///
/// # Example
///
/// ```no_run
/// use queue_probe::signals::shutdown_signal;
///
/// # async fn run() -> std::io::Result<()> {
/// let signal = shutdown_signal().await?;
/// println!("stopping on {}", signal.name());
/// # Ok(())
/// # }
/// ```
pub async fn shutdown_signal() -> io::Result<ShutdownSignal> {
    let received = wait_for_signal().await?;
    info!("📡 Received {}", received.name());
    Ok(received)
}

#[cfg(unix)]
async fn wait_for_signal() -> io::Result<ShutdownSignal> {
    use signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    Ok(tokio::select! {
        _ = interrupt.recv() => ShutdownSignal::Interrupt,
        _ = terminate.recv() => ShutdownSignal::Terminate,
    })
}

#[cfg(windows)]
async fn wait_for_signal() -> io::Result<ShutdownSignal> {
    signal::ctrl_c().await?;
    Ok(ShutdownSignal::Interrupt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_names() {
        assert_eq!(ShutdownSignal::Interrupt.name(), "SIGINT");
        assert_eq!(ShutdownSignal::Terminate.name(), "SIGTERM");
    }
}
