//! Socket.IO (v5) over Engine.IO (v4) text-frame codec.
//!
//! Every WebSocket text frame carries one Engine.IO packet. The first
//! character is the Engine.IO packet type; MESSAGE packets (`4`) wrap a
//! Socket.IO packet laid out as
//!
//! ```text
//! <type>[<namespace>,][<ack id>][<json payload>]
//! ```
//!
//! The default namespace `/` is left out of the encoding. Binary
//! attachments are not supported.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use url::Url;

/// Engine.IO protocol revision spoken by the probe.
pub const ENGINE_IO_VERSION: u8 = 4;

/// Path the Socket.IO server listens on.
pub const SOCKET_IO_PATH: &str = "/socket.io/";

pub const DEFAULT_NAMESPACE: &str = "/";

/// Codec failures.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Empty packet")]
    EmptyPacket,

    #[error("Unknown {layer} packet type: {kind:?}")]
    UnknownPacketType { layer: &'static str, kind: char },

    #[error("Invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Missing payload for {0} packet")]
    MissingPayload(&'static str),

    #[error("Malformed event payload: {0}")]
    MalformedEvent(String),

    #[error("Binary packets are not supported")]
    BinaryUnsupported,

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
}

/// Payload of the Engine.IO OPEN packet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    pub sid: String,
    #[serde(default)]
    pub upgrades: Vec<String>,
    /// Milliseconds between server pings
    pub ping_interval: u64,
    /// Milliseconds the server waits for a pong
    pub ping_timeout: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_payload: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EnginePacket {
    Open(Handshake),
    Close,
    Ping(String),
    Pong(String),
    Message(String),
    Upgrade,
    Noop,
}

impl EnginePacket {
    pub fn decode(frame: &str) -> Result<Self, ProtocolError> {
        let mut chars = frame.chars();
        let kind = chars.next().ok_or(ProtocolError::EmptyPacket)?;
        let body = chars.as_str();

        match kind {
            '0' => {
                if body.is_empty() {
                    return Err(ProtocolError::MissingPayload("open"));
                }
                Ok(EnginePacket::Open(serde_json::from_str(body)?))
            }
            '1' => Ok(EnginePacket::Close),
            '2' => Ok(EnginePacket::Ping(body.to_string())),
            '3' => Ok(EnginePacket::Pong(body.to_string())),
            '4' => Ok(EnginePacket::Message(body.to_string())),
            '5' => Ok(EnginePacket::Upgrade),
            '6' => Ok(EnginePacket::Noop),
            'b' => Err(ProtocolError::BinaryUnsupported),
            other => Err(ProtocolError::UnknownPacketType {
                layer: "engine.io",
                kind: other,
            }),
        }
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        Ok(match self {
            EnginePacket::Open(handshake) => format!("0{}", serde_json::to_string(handshake)?),
            EnginePacket::Close => "1".to_string(),
            EnginePacket::Ping(probe) => format!("2{probe}"),
            EnginePacket::Pong(probe) => format!("3{probe}"),
            EnginePacket::Message(body) => format!("4{body}"),
            EnginePacket::Upgrade => "5".to_string(),
            EnginePacket::Noop => "6".to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SocketPacket {
    Connect {
        namespace: String,
        payload: Option<Value>,
    },
    Disconnect {
        namespace: String,
    },
    Event {
        namespace: String,
        id: Option<u64>,
        name: String,
        args: Vec<Value>,
    },
    Ack {
        namespace: String,
        id: u64,
        args: Vec<Value>,
    },
    ConnectError {
        namespace: String,
        payload: Value,
    },
}

impl SocketPacket {
    /// Builds an EVENT packet for `name` with a single argument.
    pub fn event(namespace: &str, name: impl Into<String>, data: Value) -> Self {
        SocketPacket::Event {
            namespace: namespace.to_string(),
            id: None,
            name: name.into(),
            args: vec![data],
        }
    }

    pub fn namespace(&self) -> &str {
        match self {
            SocketPacket::Connect { namespace, .. }
            | SocketPacket::Disconnect { namespace }
            | SocketPacket::Event { namespace, .. }
            | SocketPacket::Ack { namespace, .. }
            | SocketPacket::ConnectError { namespace, .. } => namespace,
        }
    }

    pub fn decode(body: &str) -> Result<Self, ProtocolError> {
        let mut chars = body.chars();
        let kind = chars.next().ok_or(ProtocolError::EmptyPacket)?;
        let mut rest = chars.as_str();

        if matches!(kind, '5' | '6') {
            return Err(ProtocolError::BinaryUnsupported);
        }

        let mut namespace = DEFAULT_NAMESPACE;
        if rest.starts_with('/') {
            let end = rest.find(',').unwrap_or(rest.len());
            namespace = &rest[..end];
            rest = rest.get(end + 1..).unwrap_or("");
        }
        let namespace = namespace.to_string();

        let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        let id = if digits > 0 {
            let parsed = rest[..digits].parse::<u64>().ok();
            rest = &rest[digits..];
            parsed
        } else {
            None
        };

        let payload = if rest.is_empty() {
            None
        } else {
            Some(serde_json::from_str::<Value>(rest)?)
        };

        match kind {
            '0' => Ok(SocketPacket::Connect { namespace, payload }),
            '1' => Ok(SocketPacket::Disconnect { namespace }),
            '2' => {
                let (name, args) = split_event(payload)?;
                Ok(SocketPacket::Event {
                    namespace,
                    id,
                    name,
                    args,
                })
            }
            '3' => {
                let id = id.ok_or(ProtocolError::MissingPayload("ack id"))?;
                let args = match payload {
                    Some(Value::Array(args)) => args,
                    Some(other) => vec![other],
                    None => Vec::new(),
                };
                Ok(SocketPacket::Ack { namespace, id, args })
            }
            '4' => Ok(SocketPacket::ConnectError {
                namespace,
                payload: payload.unwrap_or(Value::Null),
            }),
            other => Err(ProtocolError::UnknownPacketType {
                layer: "socket.io",
                kind: other,
            }),
        }
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        let (kind, id, payload) = match self {
            SocketPacket::Connect { payload, .. } => ('0', None, payload.clone()),
            SocketPacket::Disconnect { .. } => ('1', None, None),
            SocketPacket::Event { id, name, args, .. } => {
                let mut items = Vec::with_capacity(args.len() + 1);
                items.push(Value::String(name.clone()));
                items.extend(args.iter().cloned());
                ('2', *id, Some(Value::Array(items)))
            }
            SocketPacket::Ack { id, args, .. } => ('3', Some(*id), Some(Value::Array(args.clone()))),
            SocketPacket::ConnectError { payload, .. } => ('4', None, Some(payload.clone())),
        };

        let mut out = String::new();
        out.push(kind);

        let namespace = self.namespace();
        if namespace != DEFAULT_NAMESPACE {
            out.push_str(namespace);
            out.push(',');
        }
        if let Some(id) = id {
            out.push_str(&id.to_string());
        }
        if let Some(payload) = payload {
            out.push_str(&serde_json::to_string(&payload)?);
        }
        Ok(out)
    }

    /// Encodes this packet wrapped in an Engine.IO MESSAGE packet, ready to
    /// be sent as a WebSocket text frame.
    pub fn to_frame(&self) -> Result<String, ProtocolError> {
        EnginePacket::Message(self.encode()?).encode()
    }
}

fn split_event(payload: Option<Value>) -> Result<(String, Vec<Value>), ProtocolError> {
    let mut items = match payload {
        Some(Value::Array(items)) => items,
        Some(other) => return Err(ProtocolError::MalformedEvent(other.to_string())),
        None => return Err(ProtocolError::MissingPayload("event")),
    };
    if items.is_empty() {
        return Err(ProtocolError::MalformedEvent("[]".to_string()));
    }
    match items.remove(0) {
        Value::String(name) => Ok((name, items)),
        other => Err(ProtocolError::MalformedEvent(format!(
            "event name must be a string, got {other}"
        ))),
    }
}

/// Turns a server base URL into the Engine.IO WebSocket endpoint.
///
/// `http`/`https` become `ws`/`wss`. Any path on the base URL is replaced by
/// `engine_path` (normally [`SOCKET_IO_PATH`]); the namespace travels in the
/// CONNECT packet, never in the URL. The query always selects the WebSocket
/// transport.
pub fn websocket_url(base: &Url, engine_path: &str) -> Result<Url, ProtocolError> {
    let scheme = match base.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => return Err(ProtocolError::UnsupportedScheme(other.to_string())),
    };

    let mut url = base.clone();
    url.set_scheme(scheme)
        .map_err(|_| ProtocolError::UnsupportedScheme(base.scheme().to_string()))?;

    url.set_path(engine_path);
    url.set_query(Some(&format!("EIO={ENGINE_IO_VERSION}&transport=websocket")));
    url.set_fragment(None);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_open_handshake() {
        let frame = r#"0{"sid":"lv_VI97HAXpY6yYWAAAC","upgrades":[],"pingInterval":25000,"pingTimeout":20000,"maxPayload":1000000}"#;

        match EnginePacket::decode(frame).unwrap() {
            EnginePacket::Open(handshake) => {
                assert_eq!(handshake.sid, "lv_VI97HAXpY6yYWAAAC");
                assert_eq!(handshake.ping_interval, 25000);
                assert_eq!(handshake.ping_timeout, 20000);
                assert_eq!(handshake.max_payload, Some(1_000_000));
            }
            other => panic!("expected open packet, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_engine_control_packets() {
        assert_eq!(EnginePacket::decode("1").unwrap(), EnginePacket::Close);
        assert_eq!(EnginePacket::decode("2").unwrap(), EnginePacket::Ping(String::new()));
        assert_eq!(EnginePacket::decode("3probe").unwrap(), EnginePacket::Pong("probe".to_string()));
        assert_eq!(EnginePacket::decode("6").unwrap(), EnginePacket::Noop);
        assert!(matches!(EnginePacket::decode(""), Err(ProtocolError::EmptyPacket)));
        assert!(matches!(
            EnginePacket::decode("9"),
            Err(ProtocolError::UnknownPacketType { kind: '9', .. })
        ));
        assert!(matches!(
            EnginePacket::decode("0"),
            Err(ProtocolError::MissingPayload("open"))
        ));
    }

    #[test]
    fn test_encode_pong_echoes_probe() {
        let pong = EnginePacket::Pong("probe".to_string());
        assert_eq!(pong.encode().unwrap(), "3probe");
    }

    #[test]
    fn test_connect_packet_carries_token() {
        let packet = SocketPacket::Connect {
            namespace: "/".to_string(),
            payload: Some(json!({ "token": "abc" })),
        };
        assert_eq!(packet.to_frame().unwrap(), r#"40{"token":"abc"}"#);
    }

    #[test]
    fn test_join_queue_event_frame() {
        let packet = SocketPacket::event("/", "joinQueue", json!({ "gameType": "Globle" }));
        assert_eq!(
            packet.to_frame().unwrap(),
            r#"42["joinQueue",{"gameType":"Globle"}]"#
        );
    }

    #[test]
    fn test_custom_namespace_and_ack_id() {
        let packet = SocketPacket::Event {
            namespace: "/admin".to_string(),
            id: Some(12),
            name: "ping".to_string(),
            args: vec![],
        };
        let encoded = packet.encode().unwrap();
        assert_eq!(encoded, r#"2/admin,12["ping"]"#);

        match SocketPacket::decode(&encoded).unwrap() {
            SocketPacket::Event { namespace, id, name, args } => {
                assert_eq!(namespace, "/admin");
                assert_eq!(id, Some(12));
                assert_eq!(name, "ping");
                assert!(args.is_empty());
            }
            other => panic!("expected event, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_connect_ack_and_error() {
        match SocketPacket::decode(r#"0{"sid":"abc123"}"#).unwrap() {
            SocketPacket::Connect { namespace, payload } => {
                assert_eq!(namespace, "/");
                assert_eq!(payload, Some(json!({ "sid": "abc123" })));
            }
            other => panic!("expected connect, got {other:?}"),
        }

        match SocketPacket::decode(r#"4{"message":"Authentication error"}"#).unwrap() {
            SocketPacket::ConnectError { payload, .. } => {
                assert_eq!(payload["message"], "Authentication error");
            }
            other => panic!("expected connect error, got {other:?}"),
        }

        assert_eq!(
            SocketPacket::decode("1/chat").unwrap(),
            SocketPacket::Disconnect {
                namespace: "/chat".to_string()
            }
        );
    }

    #[test]
    fn test_decode_event_with_several_args() {
        let packet = SocketPacket::decode(r#"2["matchFound",{"matchId":"m1"},"extra"]"#).unwrap();
        assert_eq!(
            packet,
            SocketPacket::Event {
                namespace: "/".to_string(),
                id: None,
                name: "matchFound".to_string(),
                args: vec![json!({ "matchId": "m1" }), json!("extra")],
            }
        );
    }

    #[test]
    fn test_malformed_socket_packets() {
        assert!(matches!(
            SocketPacket::decode(r#"2{"not":"an array"}"#),
            Err(ProtocolError::MalformedEvent(_))
        ));
        assert!(matches!(
            SocketPacket::decode("2[]"),
            Err(ProtocolError::MalformedEvent(_))
        ));
        assert!(matches!(
            SocketPacket::decode("2[42]"),
            Err(ProtocolError::MalformedEvent(_))
        ));
        assert!(matches!(
            SocketPacket::decode("2[oops"),
            Err(ProtocolError::InvalidJson(_))
        ));
        assert!(matches!(
            SocketPacket::decode(r#"51-["upload",{"_placeholder":true,"num":0}]"#),
            Err(ProtocolError::BinaryUnsupported)
        ));
    }

    #[test]
    fn test_websocket_url_from_http_base() {
        let base = Url::parse("http://localhost:5051").unwrap();
        let url = websocket_url(&base, SOCKET_IO_PATH).unwrap();
        assert_eq!(
            url.as_str(),
            "ws://localhost:5051/socket.io/?EIO=4&transport=websocket"
        );

        let base = Url::parse("https://games.example.com").unwrap();
        assert_eq!(websocket_url(&base, SOCKET_IO_PATH).unwrap().scheme(), "wss");
    }

    #[test]
    fn test_websocket_url_ignores_base_path() {
        let base = Url::parse("http://127.0.0.1:5051/admin").unwrap();
        let url = websocket_url(&base, SOCKET_IO_PATH).unwrap();
        assert_eq!(
            url.as_str(),
            "ws://127.0.0.1:5051/socket.io/?EIO=4&transport=websocket"
        );

        let base = Url::parse("ws://127.0.0.1:9000/").unwrap();
        let url = websocket_url(&base, "/realtime/").unwrap();
        assert_eq!(url.path(), "/realtime/");
        assert_eq!(url.query(), Some("EIO=4&transport=websocket"));
    }

    #[test]
    fn test_websocket_url_rejects_other_schemes() {
        let base = Url::parse("ftp://example.com").unwrap();
        assert!(matches!(
            websocket_url(&base, SOCKET_IO_PATH),
            Err(ProtocolError::UnsupportedScheme(scheme)) if scheme == "ftp"
        ));
    }
}
