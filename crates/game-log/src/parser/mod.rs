//! Line-by-line state machine turning log lines into game events.
//!
//! Each rule looks at one line and either leaves the state untouched or
//! updates it, pushing any resulting events. Rules run in a fixed order for
//! every line so facts seen earlier in a line's processing are visible to
//! later rules.

mod identity;
mod outcome;
mod pack;
mod state;
mod zone;

pub use state::{PACK_SIZE, PackState, ParserState};

use hslog_protocol::GameEvent;

/// Owns the correlated parser state for one watcher.
#[derive(Debug, Default)]
pub struct LogParser {
    state: ParserState,
}

impl LogParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes one line, appending emitted events to `events`.
    pub fn process_line(&mut self, line: &str, events: &mut Vec<GameEvent>) {
        zone::apply(line, &mut self.state, events);
        identity::apply_new_player(line, &mut self.state);
        identity::apply_player_name(line, &mut self.state);
        outcome::apply(line, &mut self.state, events);
        pack::apply(line, &mut self.state, events);
    }

    /// Processes lines in order and returns everything they emitted.
    pub fn process_lines<'a>(&mut self, lines: impl IntoIterator<Item = &'a str>) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for line in lines {
            self.process_line(line, &mut events);
        }
        events
    }

    /// Current parser state.
    pub fn state(&self) -> &ParserState {
        &self.state
    }
}
