use hslog_protocol::{Card, PackOpened, Player};

/// Cards in one opened pack.
pub const PACK_SIZE: usize = 5;

/// Number of players whose hero or outcome completes a game phase.
pub const PLAYERS_PER_GAME: u32 = 2;

/// Pack currently being assembled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackState {
    pub cards: Vec<Card>,
    pub first_log_time: Option<String>,
}

impl PackState {
    /// Copies the pack into an event payload.
    pub fn snapshot(&self) -> PackOpened {
        PackOpened {
            cards: self.cards.clone(),
            first_log_time: self.first_log_time.clone(),
        }
    }

    pub fn clear(&mut self) {
        self.cards.clear();
        self.first_log_time = None;
    }
}

/// Correlated facts accumulated across lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParserState {
    /// Players in discovery order.
    pub players: Vec<Player>,
    /// Players whose hero has been placed, capped at 2.
    pub player_count: u32,
    /// Players with a terminal play-state, 0..2.
    pub game_over_count: u32,
    pub pack: PackState,
}

impl ParserState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores the freshly created state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn player_by_entity(&self, entity_id: u32) -> Option<&Player> {
        self.players.iter().find(|p| p.entity_id == entity_id)
    }

    pub fn player_by_entity_mut(&mut self, entity_id: u32) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.entity_id == entity_id)
    }

    pub fn player_by_id_mut(&mut self, id: u32) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }
}
