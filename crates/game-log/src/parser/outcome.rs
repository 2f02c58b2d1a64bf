//! Game outcome tracking.

use std::sync::LazyLock;

use hslog_protocol::{GameEvent, PlayState};
use regex::Regex;

use super::identity::refers_to;
use super::state::{PLAYERS_PER_GAME, ParserState};

// [Power] GameState.DebugPrintPower() - TAG_CHANGE Entity=artaios tag=PLAYSTATE value=LOST
static PLAYSTATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\[Power\] GameState\.DebugPrintPower\(\)\s-\s*TAG_CHANGE Entity=(.+?) tag=PLAYSTATE value=(WON|LOST|TIED)\b",
    )
    .expect("play state pattern is valid")
});

/// Records a terminal play-state for the named player.
///
/// The entity must match exactly one known player. Once both players have
/// an outcome, `game-over` is emitted and the state is reset for the next
/// game.
pub fn apply(line: &str, state: &mut ParserState, events: &mut Vec<GameEvent>) -> bool {
    let Some(caps) = PLAYSTATE_RE.captures(line) else {
        return false;
    };
    let entity = &caps[1];
    let Some(status) = PlayState::from_log(&caps[2]) else {
        return false;
    };

    let matches: Vec<usize> = state
        .players
        .iter()
        .enumerate()
        .filter(|(_, p)| refers_to(p, entity))
        .map(|(i, _)| i)
        .collect();

    let index = match matches.as_slice() {
        [index] => *index,
        [] => {
            tracing::debug!(target: "hslog::game_over", entity, "play state for unknown player");
            return true;
        }
        _ => {
            tracing::warn!(
                target: "hslog::game_over",
                entity,
                candidates = matches.len(),
                "play state matches several players, ignoring"
            );
            return true;
        }
    };

    let player = &mut state.players[index];
    let first_outcome = player.status.is_none();
    player.status = Some(status);
    if first_outcome {
        state.game_over_count += 1;
    }

    tracing::debug!(
        target: "hslog::game_over",
        entity,
        ?status,
        game_over_count = state.game_over_count,
        "player outcome recorded"
    );

    if state.game_over_count == PLAYERS_PER_GAME {
        tracing::info!(target: "hslog::game_over", "The current game has ended.");
        events.push(GameEvent::GameOver(state.players.clone()));
        state.reset();
    }
    true
}
