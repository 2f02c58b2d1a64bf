//! Card pack assembly from `NotifyOfCardGained` lines.

use std::sync::LazyLock;

use hslog_protocol::{Card, GameEvent, Golden};
use regex::Regex;

use super::state::{PACK_SIZE, ParserState};

// D 15:08:54.0669559 NotifyOfCardGained: [name=Booty Bay Bookie cardId=TRL_504 type=MINION] NORMAL 1
static CARD_GAINED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"D (\S+) NotifyOfCardGained: \[name=(.*?) cardId=(\S+) type=(\S+)\] (NORMAL|GOLDEN) (\S+)",
    )
    .expect("card gained pattern is valid")
});

/// Adds a gained card to the current pack, emitting `pack-opened` on the
/// fifth card.
pub fn apply(line: &str, state: &mut ParserState, events: &mut Vec<GameEvent>) -> bool {
    let Some(caps) = CARD_GAINED_RE.captures(line) else {
        return false;
    };
    let Some(golden) = Golden::from_log(&caps[5]) else {
        return false;
    };

    let pack = &mut state.pack;
    if pack.cards.is_empty() {
        pack.first_log_time = Some(caps[1].to_string());
    }
    pack.cards.push(Card {
        card_name: caps[2].to_string(),
        card_id: caps[3].to_string(),
        card_type: caps[4].to_string(),
        golden,
        qty_owned: caps[6].to_string(),
    });

    tracing::debug!(target: "hslog::pack", card = &caps[2], count = pack.cards.len(), "card gained");

    if pack.cards.len() == PACK_SIZE {
        tracing::info!(
            target: "hslog::pack",
            first_log_time = pack.first_log_time.as_deref().unwrap_or_default(),
            "pack opened"
        );
        events.push(GameEvent::PackOpened(pack.snapshot()));
        pack.clear();
    }
    true
}
