//! One probe run: connect, join a queue, listen, close.
//!
//! The run is bounded by a fixed window. Whatever happens on the wire
//! (refused connection, rejected credentials, server hang-up) the session
//! idles until the window closes or a shutdown signal arrives, then releases
//! the connection and returns a [`ProbeReport`].

use std::future::Future;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio::time::Instant;
use tokio_tungstenite::{
    connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream,
};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::ProbeConfig;
use crate::error::ProbeError;
use crate::events::{GameType, Notification, Outcome, JOIN_QUEUE_EVENT};
use crate::protocol::{websocket_url, EnginePacket, SocketPacket};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// How long the closing handshake may take once the window is over.
const CLOSE_GRACE: Duration = Duration::from_secs(1);

/// Everything observed during one run, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct ProbeReport {
    pub notifications: Vec<Notification>,
    pub elapsed: Duration,
    /// True when a shutdown signal ended the window early
    pub interrupted: bool,
}

impl ProbeReport {
    /// Logs and stores a notification.
    pub fn record(&mut self, notification: Notification) {
        notification.log();
        self.notifications.push(notification);
    }

    /// Wire names of the notifications, in order.
    pub fn names(&self) -> Vec<&'static str> {
        self.notifications.iter().map(Notification::name).collect()
    }

    pub fn saw(&self, name: &str) -> bool {
        self.notifications.iter().any(|n| n.name() == name)
    }

    pub fn passed(&self) -> usize {
        self.count(Outcome::Pass)
    }

    pub fn failed(&self) -> usize {
        self.count(Outcome::Fail)
    }

    fn count(&self, outcome: Outcome) -> usize {
        self.notifications
            .iter()
            .filter(|n| n.outcome() == outcome)
            .count()
    }

    /// True while the namespace is joined: a `connect` has been seen and no
    /// `disconnect` after it.
    pub fn is_connected(&self) -> bool {
        for notification in self.notifications.iter().rev() {
            match notification {
                Notification::Connect { .. } => return true,
                Notification::Disconnect { .. } => return false,
                _ => {}
            }
        }
        false
    }
}

/// How the conversation with the server ended before the window closed.
enum Ending {
    /// The transport is gone; nothing left to close.
    TransportClosed,
    /// The server ended the Socket.IO session but the socket may still be open.
    SessionEnded,
}

/// A configured probe run.
#[derive(Debug, Clone)]
pub struct ProbeSession {
    url: Url,
    namespace: String,
    token: String,
    game_type: GameType,
    window: Duration,
}

impl ProbeSession {
    /// Prepares a session from configuration and the token to present.
    pub fn new(config: &ProbeConfig, token: impl Into<String>) -> Result<Self, ProbeError> {
        let url = websocket_url(&config.server_url()?, &config.server.path)?;
        Ok(Self {
            url,
            namespace: config.server.namespace.clone(),
            token: token.into(),
            game_type: config.probe.game_type,
            window: config.window(),
        })
    }

    /// Overrides the listening window.
    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Runs for the full window.
    pub async fn run(&self) -> ProbeReport {
        self.run_until(std::future::pending()).await
    }

    /// Runs until the window closes or `shutdown` resolves, whichever comes
    /// first, then closes the connection.
    pub async fn run_until<F>(&self, shutdown: F) -> ProbeReport
    where
        F: Future<Output = ()>,
    {
        let started = Instant::now();
        let deadline = started + self.window;
        let mut report = ProbeReport::default();
        let mut socket: Option<WsStream> = None;

        info!("Testing WebSocket connection to {}", self.url);

        let interrupted = {
            let drive = tokio::time::timeout_at(deadline, self.drive(&mut socket, &mut report));
            tokio::pin!(shutdown);
            tokio::select! {
                _ = drive => false,
                _ = &mut shutdown => {
                    info!("🛑 Shutdown requested, ending probe early");
                    true
                }
            }
        };

        if let Some(ws) = socket.take() {
            self.close(ws, &mut report).await;
        }

        report.elapsed = started.elapsed();
        report.interrupted = interrupted;

        info!(
            "📊 {} notifications ({} passed, {} failed) in {:.1}s",
            report.notifications.len(),
            report.passed(),
            report.failed(),
            report.elapsed.as_secs_f64()
        );
        info!("Test completed");
        report
    }

    /// Talks to the server, then idles. Never returns on its own; the window
    /// deadline cancels it.
    async fn drive(&self, socket: &mut Option<WsStream>, report: &mut ProbeReport) {
        match self.converse(socket, report).await {
            Ok(Ending::TransportClosed) => *socket = None,
            Ok(Ending::SessionEnded) => {}
            Err(e) => {
                let transport_lost = matches!(e, ProbeError::Connect(_));
                if transport_lost && report.is_connected() {
                    debug!("Transport lost: {}", e);
                    report.record(Notification::Disconnect {
                        reason: "transport error".to_string(),
                    });
                } else if report.saw("connect") {
                    report.record(Notification::Error(Value::String(e.to_string())));
                } else {
                    report.record(Notification::ConnectError {
                        message: e.to_string(),
                    });
                }
                if transport_lost {
                    *socket = None;
                }
            }
        }

        debug!("Waiting for the probe window to close");
        std::future::pending::<()>().await;
    }

    async fn converse(
        &self,
        socket: &mut Option<WsStream>,
        report: &mut ProbeReport,
    ) -> Result<Ending, ProbeError> {
        let (stream, _) = connect_async(self.url.as_str()).await?;
        let ws = socket.insert(stream);

        let handshake = match next_text(ws).await? {
            Some(frame) => match EnginePacket::decode(&frame)? {
                EnginePacket::Open(handshake) => handshake,
                other => {
                    warn!("Expected Engine.IO open packet, got {:?}", other);
                    return Err(ProbeError::HandshakeIncomplete);
                }
            },
            None => return Err(ProbeError::HandshakeIncomplete),
        };
        debug!(
            "Engine.IO session {} (ping every {}ms, timeout {}ms)",
            handshake.sid, handshake.ping_interval, handshake.ping_timeout
        );

        let connect = SocketPacket::Connect {
            namespace: self.namespace.clone(),
            payload: Some(json!({ "token": self.token })),
        };
        send_frame(ws, connect.to_frame()?).await?;

        while let Some(frame) = next_text(ws).await? {
            let packet = match EnginePacket::decode(&frame) {
                Ok(packet) => packet,
                Err(e) => {
                    warn!("Ignoring undecodable frame {:?}: {}", frame, e);
                    continue;
                }
            };

            match packet {
                EnginePacket::Ping(probe) => {
                    send_frame(ws, EnginePacket::Pong(probe).encode()?).await?;
                }
                EnginePacket::Close => {
                    report.record(Notification::Disconnect {
                        reason: "transport close".to_string(),
                    });
                    return Ok(Ending::TransportClosed);
                }
                EnginePacket::Message(body) => {
                    let packet = match SocketPacket::decode(&body) {
                        Ok(packet) => packet,
                        Err(e) => {
                            warn!("Ignoring undecodable packet {:?}: {}", body, e);
                            continue;
                        }
                    };
                    if packet.namespace() != self.namespace {
                        debug!("Ignoring packet for namespace {}", packet.namespace());
                        continue;
                    }
                    if let Some(ending) = self.handle_packet(ws, packet, &handshake.sid, report).await? {
                        return Ok(ending);
                    }
                }
                other => debug!("Ignoring Engine.IO packet {:?}", other),
            }
        }

        if report.is_connected() {
            report.record(Notification::Disconnect {
                reason: "transport close".to_string(),
            });
        }
        Ok(Ending::TransportClosed)
    }

    async fn handle_packet(
        &self,
        ws: &mut WsStream,
        packet: SocketPacket,
        engine_sid: &str,
        report: &mut ProbeReport,
    ) -> Result<Option<Ending>, ProbeError> {
        match packet {
            SocketPacket::Connect { payload, .. } => {
                let socket_id = payload
                    .as_ref()
                    .and_then(|p| p.get("sid"))
                    .and_then(Value::as_str)
                    .unwrap_or(engine_sid)
                    .to_string();
                report.record(Notification::Connect { socket_id });

                info!("Joining queue for {}...", self.game_type);
                let join = SocketPacket::event(
                    &self.namespace,
                    JOIN_QUEUE_EVENT,
                    json!({ "gameType": self.game_type }),
                );
                send_frame(ws, join.to_frame()?).await?;
            }
            SocketPacket::ConnectError { payload, .. } => {
                let message = payload
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| payload.to_string());
                report.record(Notification::ConnectError { message });
                return Ok(Some(Ending::SessionEnded));
            }
            SocketPacket::Disconnect { .. } => {
                report.record(Notification::Disconnect {
                    reason: "io server disconnect".to_string(),
                });
                return Ok(Some(Ending::SessionEnded));
            }
            SocketPacket::Event { name, args, .. } => match Notification::from_event(&name, args) {
                Some(notification) => report.record(notification),
                None => debug!("Ignoring event {}", name),
            },
            SocketPacket::Ack { id, .. } => debug!("Ignoring ack {}", id),
        }
        Ok(None)
    }

    /// Leaves the namespace (if joined) and closes the WebSocket. The whole
    /// exchange is bounded by [`CLOSE_GRACE`].
    async fn close(&self, mut ws: WsStream, report: &mut ProbeReport) {
        let joined = report.is_connected();
        if joined {
            report.record(Notification::Disconnect {
                reason: "io client disconnect".to_string(),
            });
        }

        let leave = SocketPacket::Disconnect {
            namespace: self.namespace.clone(),
        };
        let shutdown = async {
            if joined {
                send_frame(&mut ws, leave.to_frame()?).await?;
            }
            ws.close(None).await?;
            Ok::<(), ProbeError>(())
        };

        match tokio::time::timeout(CLOSE_GRACE, shutdown).await {
            Ok(Ok(())) => debug!("WebSocket closed"),
            Ok(Err(e)) => debug!("WebSocket close failed: {}", e),
            Err(_) => debug!("WebSocket close timed out"),
        }
    }
}

/// Next text frame, skipping control frames. `None` once the peer has closed.
async fn next_text(ws: &mut WsStream) -> Result<Option<String>, ProbeError> {
    while let Some(message) = ws.next().await {
        match message? {
            Message::Text(text) => return Ok(Some(text.as_str().to_owned())),
            Message::Close(_) => return Ok(None),
            Message::Binary(_) => warn!("Ignoring binary frame"),
            _ => {}
        }
    }
    Ok(None)
}

async fn send_frame(ws: &mut WsStream, frame: String) -> Result<(), ProbeError> {
    ws.send(Message::Text(frame.into())).await?;
    Ok(())
}
