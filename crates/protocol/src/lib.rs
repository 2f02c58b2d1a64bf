//! Payload types for events emitted by the Hearthstone log watcher.
//!
//! Every type here is plain data: JSON-serializable, cloned into events
//! at emission time and never shared with the parser afterwards.

pub mod events;
pub mod types;

pub use events::{GameEvent, PackOpened, ZoneChange};
pub use types::{Card, Golden, PlayState, Player, Team};
