//! Player discovery and naming.

use std::sync::LazyLock;

use hslog_protocol::Player;
use regex::{Regex, RegexBuilder};

use super::state::ParserState;

// GameState.DebugPrintPower() -     Player EntityID=2 PlayerID=1 GameAccountId=[hi=... lo=...]
static NEW_PLAYER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Player EntityID=(\d+) PlayerID=(\d+)").expect("new player pattern is valid")
});

// [Zone] ZoneChangeList.ProcessChanges() - processing index=66 change=powerTask=[power=[type=TAG_CHANGE
// entity=[id=2 cardId= name=artaios] tag=PLAYSTATE value=PLAYING] complete=False] entity=artaios ...
static PLAYER_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\[Zone\] ZoneChangeList\.ProcessChanges\(\) - processing index=\d+ change=powerTask=\[power=\[type=TAG_CHANGE entity=\[id=(\d+) cardId= name=(.+?)\] tag=PLAYSTATE value=PLAYING\]",
    )
    .expect("player name pattern is valid")
});

/// Registers a player announced by `Player EntityID=<m> PlayerID=<n>`.
///
/// Returns whether a new player was added; a known entity id is a no-op.
pub fn apply_new_player(line: &str, state: &mut ParserState) -> bool {
    let Some(caps) = NEW_PLAYER_RE.captures(line) else {
        return false;
    };
    let (Ok(entity_id), Ok(id)) = (caps[1].parse::<u32>(), caps[2].parse::<u32>()) else {
        return false;
    };

    if state.player_by_entity(entity_id).is_some() {
        return false;
    }

    tracing::debug!(target: "hslog::main", id, entity_id, "new player");
    state.players.push(Player::new(id, entity_id));
    true
}

/// Names the player whose entity enters the `PLAYING` state.
///
/// Returns whether a name was assigned. Players that already have a name
/// keep it.
pub fn apply_player_name(line: &str, state: &mut ParserState) -> bool {
    let Some(caps) = PLAYER_NAME_RE.captures(line) else {
        return false;
    };
    let Ok(entity_id) = caps[1].parse::<u32>() else {
        return false;
    };
    let name = &caps[2];

    match state.player_by_entity_mut(entity_id) {
        Some(player) if player.name.is_none() => {
            tracing::debug!(target: "hslog::main", entity_id, name, "player named");
            player.name = Some(name.to_string());
            true
        }
        _ => false,
    }
}

/// Builds the case-insensitive pattern matching a player's name with an
/// optional `#1234` discriminator.
pub fn name_pattern(name: &str) -> Option<Regex> {
    RegexBuilder::new(&format!(r"^{}(#\d+)?$", regex::escape(name)))
        .case_insensitive(true)
        .build()
        .ok()
}

/// Returns whether `entity` refers to `player` by name.
pub fn refers_to(player: &Player, entity: &str) -> bool {
    player
        .name
        .as_deref()
        .and_then(name_pattern)
        .is_some_and(|re| re.is_match(entity))
}
