use serde::{Deserialize, Serialize};

use crate::types::{Card, Player, Team};

/// An entity moving between zones.
///
/// Absent source or destination parts (e.g. an entity created from nothing)
/// are `None` and omitted from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneChange {
    pub card_name: String,
    pub entity_id: u32,
    pub card_id: String,
    pub player_id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_team: Option<Team>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_team: Option<Team>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_zone: Option<String>,
}

/// A completed five-card pack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackOpened {
    pub cards: Vec<Card>,
    pub first_log_time: Option<String>,
}

/// Events produced by the log parser.
///
/// Serialized as `{"event": "<name>", "payload": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "kebab-case")]
pub enum GameEvent {
    ZoneChange(ZoneChange),
    GameStart(Vec<Player>),
    GameOver(Vec<Player>),
    PackOpened(PackOpened),
}

impl GameEvent {
    /// Returns the event name as seen by subscribers.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ZoneChange(_) => "zone-change",
            Self::GameStart(_) => "game-start",
            Self::GameOver(_) => "game-over",
            Self::PackOpened(_) => "pack-opened",
        }
    }
}
