use serde::{Deserialize, Serialize};

/// Side of the board an entity or player belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Team {
    Friendly,
    Opposing,
}

impl Team {
    /// Parses the team token used in zone lines (`FRIENDLY` / `OPPOSING`).
    pub fn from_log(token: &str) -> Option<Self> {
        match token {
            "FRIENDLY" => Some(Self::Friendly),
            "OPPOSING" => Some(Self::Opposing),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Friendly => "FRIENDLY",
            Self::Opposing => "OPPOSING",
        }
    }
}

/// Terminal per-player game outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayState {
    Won,
    Lost,
    Tied,
}

impl PlayState {
    /// Parses the `PLAYSTATE` tag value. Non-terminal values yield `None`.
    pub fn from_log(token: &str) -> Option<Self> {
        match token {
            "WON" => Some(Self::Won),
            "LOST" => Some(Self::Lost),
            "TIED" => Some(Self::Tied),
            _ => None,
        }
    }
}

/// A player seen in the current game.
///
/// `id` and `entity_id` are fixed when the player is discovered; the
/// remaining fields fill in as later lines reveal them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: u32,
    pub entity_id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<Team>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PlayState>,
}

impl Player {
    /// Creates a player with only its identity known.
    pub fn new(id: u32, entity_id: u32) -> Self {
        Self {
            id,
            entity_id,
            name: None,
            team: None,
            status: None,
        }
    }
}

/// Card finish as reported by the collection manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Golden {
    Normal,
    Golden,
}

impl Golden {
    pub fn from_log(token: &str) -> Option<Self> {
        match token {
            "NORMAL" => Some(Self::Normal),
            "GOLDEN" => Some(Self::Golden),
            _ => None,
        }
    }
}

/// One card-acquisition record. Text fields are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub card_name: String,
    pub card_id: String,
    pub card_type: String,
    pub golden: Golden,
    #[serde(rename = "qty_owned")]
    pub qty_owned: String,
}
