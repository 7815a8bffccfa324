//! Game types and the named notifications the probe listens for.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

/// Name of the request the probe emits once connected.
pub const JOIN_QUEUE_EVENT: &str = "joinQueue";

/// Game modes offered by the matchmaking lobby.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameType {
    #[default]
    Globle,
    Population,
    Findle,
    Flagle,
    Worldle,
    Capitals,
    Hangman,
    Shaple,
    #[serde(rename = "US")]
    Us,
}

impl GameType {
    pub const ALL: [GameType; 9] = [
        GameType::Globle,
        GameType::Population,
        GameType::Findle,
        GameType::Flagle,
        GameType::Worldle,
        GameType::Capitals,
        GameType::Hangman,
        GameType::Shaple,
        GameType::Us,
    ];

    /// Identifier sent on the wire in `joinQueue`.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameType::Globle => "Globle",
            GameType::Population => "Population",
            GameType::Findle => "Findle",
            GameType::Flagle => "Flagle",
            GameType::Worldle => "Worldle",
            GameType::Capitals => "Capitals",
            GameType::Hangman => "Hangman",
            GameType::Shaple => "Shaple",
            GameType::Us => "US",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown game type: {0} (expected one of Globle, Population, Findle, Flagle, Worldle, Capitals, Hangman, Shaple, US)")]
pub struct UnknownGameType(pub String);

impl FromStr for GameType {
    type Err = UnknownGameType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameType::ALL
            .into_iter()
            .find(|game| game.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownGameType(s.to_string()))
    }
}

/// Whether a notification means the server behaved as hoped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Fail,
}

/// A named notification observed during a probe run.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Connect { socket_id: String },
    Disconnect { reason: String },
    ConnectError { message: String },
    QueueJoined(Value),
    QueueError(Value),
    MatchFound(Value),
    GameStart(Value),
    GameEnd(Value),
    Error(Value),
}

impl Notification {
    /// Maps a server EVENT to a notification. Events outside the fixed set
    /// yield `None`.
    pub fn from_event(name: &str, mut args: Vec<Value>) -> Option<Self> {
        let data = if args.is_empty() {
            Value::Null
        } else {
            args.swap_remove(0)
        };

        match name {
            "queueJoined" => Some(Notification::QueueJoined(data)),
            "queueError" => Some(Notification::QueueError(data)),
            "matchFound" => Some(Notification::MatchFound(data)),
            "gameStart" => Some(Notification::GameStart(data)),
            "gameEnd" => Some(Notification::GameEnd(data)),
            "error" => Some(Notification::Error(data)),
            _ => None,
        }
    }

    /// Wire name of the notification.
    pub fn name(&self) -> &'static str {
        match self {
            Notification::Connect { .. } => "connect",
            Notification::Disconnect { .. } => "disconnect",
            Notification::ConnectError { .. } => "connect_error",
            Notification::QueueJoined(_) => "queueJoined",
            Notification::QueueError(_) => "queueError",
            Notification::MatchFound(_) => "matchFound",
            Notification::GameStart(_) => "gameStart",
            Notification::GameEnd(_) => "gameEnd",
            Notification::Error(_) => "error",
        }
    }

    pub fn outcome(&self) -> Outcome {
        match self {
            Notification::Connect { .. }
            | Notification::QueueJoined(_)
            | Notification::MatchFound(_)
            | Notification::GameStart(_)
            | Notification::GameEnd(_) => Outcome::Pass,
            Notification::Disconnect { .. }
            | Notification::ConnectError { .. }
            | Notification::QueueError(_)
            | Notification::Error(_) => Outcome::Fail,
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            Notification::MatchFound(_) => "🎮",
            _ => match self.outcome() {
                Outcome::Pass => "✅",
                Outcome::Fail => "❌",
            },
        }
    }

    /// Writes the notification to the log with its pass/fail marker.
    pub fn log(&self) {
        let marker = self.marker();
        match self {
            Notification::Connect { socket_id } => {
                info!("{marker} Socket connected successfully");
                info!("Socket ID: {socket_id}");
            }
            Notification::Disconnect { reason } => warn!("{marker} Socket disconnected ({reason})"),
            Notification::ConnectError { message } => {
                error!("{marker} Socket connection error: {message}")
            }
            Notification::QueueJoined(data) => info!("{marker} Joined queue: {data}"),
            Notification::QueueError(data) => warn!("{marker} Queue error: {data}"),
            Notification::MatchFound(data) => info!("{marker} Match found: {data}"),
            Notification::GameStart(data) => info!("{marker} Game started: {data}"),
            Notification::GameEnd(data) => info!("{marker} Game ended: {data}"),
            Notification::Error(data) => error!("{marker} Socket error: {data}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_game_type_parsing() {
        assert_eq!("Globle".parse::<GameType>().unwrap(), GameType::Globle);
        assert_eq!("flagle".parse::<GameType>().unwrap(), GameType::Flagle);
        assert_eq!("US".parse::<GameType>().unwrap(), GameType::Us);
        assert_eq!(
            "Chess".parse::<GameType>(),
            Err(UnknownGameType("Chess".to_string()))
        );
    }

    #[test]
    fn test_game_type_wire_names() {
        assert_eq!(serde_json::to_value(GameType::Us).unwrap(), json!("US"));
        assert_eq!(serde_json::to_value(GameType::Worldle).unwrap(), json!("Worldle"));
        for game in GameType::ALL {
            assert_eq!(game.to_string().parse::<GameType>().unwrap(), game);
        }
        assert_eq!(GameType::default(), GameType::Globle);
    }

    #[test]
    fn test_from_event_known_names() {
        let data = json!({ "gameType": "Globle" });
        let cases = [
            ("queueJoined", Notification::QueueJoined(data.clone())),
            ("queueError", Notification::QueueError(data.clone())),
            ("matchFound", Notification::MatchFound(data.clone())),
            ("gameStart", Notification::GameStart(data.clone())),
            ("gameEnd", Notification::GameEnd(data.clone())),
            ("error", Notification::Error(data.clone())),
        ];
        for (name, expected) in cases {
            let notification = Notification::from_event(name, vec![data.clone()]).unwrap();
            assert_eq!(notification.name(), name);
            assert_eq!(notification, expected);
        }

        let ended = Notification::from_event("gameEnd", vec![]);
        assert_eq!(ended, Some(Notification::GameEnd(Value::Null)));

        assert!(Notification::from_event("leaderboardUpdate", vec![json!(1)]).is_none());
    }

    #[test]
    fn test_markers_and_outcomes() {
        let connect = Notification::Connect {
            socket_id: "abc".to_string(),
        };
        assert_eq!(connect.outcome(), Outcome::Pass);
        assert_eq!(connect.marker(), "✅");

        let matched = Notification::MatchFound(json!({}));
        assert_eq!(matched.outcome(), Outcome::Pass);
        assert_eq!(matched.marker(), "🎮");

        let refused = Notification::ConnectError {
            message: "refused".to_string(),
        };
        assert_eq!(refused.outcome(), Outcome::Fail);
        assert_eq!(refused.marker(), "❌");
        assert_eq!(refused.name(), "connect_error");

        let passes = [
            Notification::QueueJoined(Value::Null),
            Notification::GameStart(Value::Null),
            Notification::GameEnd(Value::Null),
        ];
        for notification in passes {
            assert_eq!(notification.outcome(), Outcome::Pass, "{notification:?}");
            assert_eq!(notification.marker(), "✅");
        }

        let failures = [
            Notification::Disconnect {
                reason: "io server disconnect".to_string(),
            },
            Notification::QueueError(Value::Null),
            Notification::Error(Value::Null),
        ];
        for notification in failures {
            assert_eq!(notification.outcome(), Outcome::Fail, "{notification:?}");
            assert_eq!(notification.marker(), "❌");
        }
    }
}
