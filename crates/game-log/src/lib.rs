//! Hearthstone log watcher: tail the game's log files and turn new lines
//! into game events.
//!
//! The tailer reads only bytes appended since the last read, the line
//! splitter reassembles lines across reads, and the parser correlates facts
//! from different lines (players, heroes, outcomes, card packs) into
//! [`GameEvent`]s.

mod client_config;
mod error;
mod lines;
mod options;
mod parser;
mod tailer;
mod watcher;

pub use client_config::{LOG_CONFIG_TEMPLATE, ensure_installed as ensure_client_config};
pub use error::WatchError;
pub use hslog_protocol::GameEvent;
pub use lines::LineSplitter;
pub use options::WatcherOptions;
pub use parser::{LogParser, PACK_SIZE, PackState, ParserState};
pub use tailer::{Chunk, FileTailer, OnChunkFn, TailHandle};
pub use watcher::{LogWatcher, OnEventFn};
