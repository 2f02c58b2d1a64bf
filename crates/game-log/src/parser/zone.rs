//! Zone transitions and hero placement.

use std::sync::LazyLock;

use hslog_protocol::{GameEvent, Team, ZoneChange};
use regex::Regex;

use super::state::{PLAYERS_PER_GAME, ParserState};

// [Zone] ZoneChangeList.ProcessChanges() - id=167 local=False [entityName=Lyra the Sunshard id=7
// zone=HAND zonePos=0 cardId=UNG_963 player=1] zone from FRIENDLY DECK -> FRIENDLY HAND
static ZONE_CHANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\[Zone\] ZoneChangeList\.ProcessChanges\(\) - id=\d+ local=\S+ \[entityName=(.*) id=(\d+) zone=\S* zonePos=\d+ cardId=(\S*) player=(\d+)\] zone from (.*?) -> (.*)$",
    )
    .expect("zone change pattern is valid")
});

/// Destination zone suffix marking a hero entering play.
const HERO_MARKER: &str = "(Hero)";

/// Handles an entity moving between zones.
///
/// Emits `zone-change` for every match. A hero placement assigns the
/// owner's team and, once both heroes are down, emits `game-start`.
pub fn apply(line: &str, state: &mut ParserState, events: &mut Vec<GameEvent>) -> bool {
    let Some(change) = parse(line) else {
        return false;
    };

    tracing::debug!(
        target: "hslog::zone_change",
        "{} moved from {} {} to {} {}.",
        change.card_name,
        team_label(change.from_team),
        change.from_zone.as_deref().unwrap_or("-"),
        team_label(change.to_team),
        change.to_zone.as_deref().unwrap_or("-"),
    );

    let hero_team = change
        .to_zone
        .as_deref()
        .filter(|zone| zone.ends_with(HERO_MARKER))
        .map(|_| change.to_team);
    let player_id = change.player_id;

    events.push(GameEvent::ZoneChange(change));

    if let Some(team) = hero_team {
        place_hero(player_id, team, state, events);
    }
    true
}

fn place_hero(
    player_id: u32,
    team: Option<Team>,
    state: &mut ParserState,
    events: &mut Vec<GameEvent>,
) {
    let Some(player) = state.player_by_id_mut(player_id) else {
        tracing::debug!(target: "hslog::zone_change", player_id, "hero placed for unknown player");
        return;
    };

    let newly_assigned = player.team.is_none() && team.is_some();
    if team.is_some() {
        player.team = team;
    }
    if !newly_assigned || state.player_count >= PLAYERS_PER_GAME {
        return;
    }

    state.player_count += 1;
    if state.player_count == PLAYERS_PER_GAME {
        tracing::info!(target: "hslog::game_start", "A game has started.");
        events.push(GameEvent::GameStart(state.players.clone()));
    }
}

fn parse(line: &str) -> Option<ZoneChange> {
    let caps = ZONE_CHANGE_RE.captures(line)?;
    let (from_team, from_zone) = split_side(caps.get(5).map_or("", |m| m.as_str()));
    let (to_team, to_zone) = split_side(caps.get(6).map_or("", |m| m.as_str()));

    Some(ZoneChange {
        card_name: caps[1].to_string(),
        entity_id: caps[2].parse().ok()?,
        card_id: caps[3].to_string(),
        player_id: caps[4].parse().ok()?,
        from_team,
        from_zone,
        to_team,
        to_zone,
    })
}

/// Splits `FRIENDLY PLAY (Hero)` into its team and zone parts.
fn split_side(side: &str) -> (Option<Team>, Option<String>) {
    let side = side.trim();
    let (team, zone) = match side.split_once(' ') {
        Some((head, rest)) => match Team::from_log(head) {
            Some(team) => (Some(team), rest.trim()),
            None => (None, side),
        },
        None => match Team::from_log(side) {
            Some(team) => (Some(team), ""),
            None => (None, side),
        },
    };
    let zone = (!zone.is_empty()).then(|| zone.to_string());
    (team, zone)
}

fn team_label(team: Option<Team>) -> &'static str {
    team.map_or("-", |t| t.as_str())
}
