//! Watches the game's log files and delivers parsed events.
//!
//! Both tailers push their chunks into one queue. A single consumer task
//! owns the line splitters and the parser, so lines are handled strictly in
//! arrival order and the parser state is never shared.

use std::sync::Arc;

use hslog_protocol::GameEvent;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;

use crate::client_config;
use crate::error::WatchError;
use crate::lines::LineSplitter;
use crate::options::WatcherOptions;
use crate::parser::LogParser;
use crate::tailer::{Chunk, FileTailer, TailHandle};

/// Callback invoked with every emitted event.
pub type OnEventFn = Box<dyn Fn(GameEvent) + Send + Sync + 'static>;

/// Which tailed file a chunk came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogSource {
    Power,
    Achievements,
}

impl LogSource {
    const ALL: [LogSource; 2] = [LogSource::Power, LogSource::Achievements];

    fn index(self) -> usize {
        match self {
            LogSource::Power => 0,
            LogSource::Achievements => 1,
        }
    }
}

/// Tails the main and achievements logs and emits game events.
pub struct LogWatcher {
    options: WatcherOptions,
    on_event: Arc<OnEventFn>,
    running: Mutex<Option<Running>>,
}

struct Running {
    tails: Vec<TailHandle>,
    consumer: JoinHandle<()>,
}

impl LogWatcher {
    /// Creates a watcher. Nothing is read until [`start`](Self::start).
    pub fn new(options: WatcherOptions, on_event: OnEventFn) -> Self {
        Self {
            options,
            on_event: Arc::new(on_event),
            running: Mutex::new(None),
        }
    }

    /// Installs the client config if needed and starts both tailers.
    ///
    /// Parser state starts empty on every start.
    pub async fn start(&self) -> Result<(), WatchError> {
        let mut running = self.running.lock().await;
        if running.is_some() {
            return Err(WatchError::AlreadyRunning);
        }

        tracing::info!(target: "hslog::main", config_file = %self.options.config_file.display(), "config file path");
        tracing::info!(target: "hslog::main", log_file = %self.options.log_file.display(), "log file path");
        tracing::info!(
            target: "hslog::main",
            log_file = %self.options.log_file_achievements.display(),
            "achievements log file path"
        );

        if let Err(e) = client_config::ensure_installed(&self.options.config_file) {
            tracing::warn!(target: "hslog::main", error = %e, "continuing without log.config");
        }

        let (queue_tx, queue_rx) = mpsc::unbounded_channel();

        let tails = LogSource::ALL
            .into_iter()
            .map(|source| {
                let path = match source {
                    LogSource::Power => &self.options.log_file,
                    LogSource::Achievements => &self.options.log_file_achievements,
                };
                let tx = queue_tx.clone();
                FileTailer::new(path).start(Box::new(move |chunk| {
                    let _ = tx.send((source, chunk));
                }))
            })
            .collect();
        drop(queue_tx);

        let consumer = tokio::spawn(consume(
            queue_rx,
            self.options.end_of_line.clone(),
            Arc::clone(&self.on_event),
        ));

        *running = Some(Running { tails, consumer });
        tracing::info!(target: "hslog::main", "Log watcher started.");
        Ok(())
    }

    /// Stops both tailers and waits for queued chunks to be parsed.
    ///
    /// No event is delivered after this returns. Stopping an idle watcher
    /// does nothing.
    pub async fn stop(&self) {
        let Some(running) = self.running.lock().await.take() else {
            return;
        };

        for tail in running.tails {
            tail.stop().await;
        }
        // Every sender lived in a tail callback, so the queue is closed now.
        if let Err(e) = running.consumer.await {
            tracing::warn!(target: "hslog::main", error = %e, "event consumer ended abnormally");
        }
        tracing::info!(target: "hslog::main", "Log watcher stopped.");
    }

    pub async fn is_running(&self) -> bool {
        self.running.lock().await.is_some()
    }
}

async fn consume(
    mut queue: mpsc::UnboundedReceiver<(LogSource, Chunk)>,
    end_of_line: String,
    on_event: Arc<OnEventFn>,
) {
    let mut parser = LogParser::new();
    let mut splitters = LogSource::ALL.map(|_| LineSplitter::new(&end_of_line));
    let mut events = Vec::new();

    while let Some((source, chunk)) = queue.recv().await {
        let splitter = &mut splitters[source.index()];
        if chunk.truncated {
            splitter.reset();
        }

        for line in splitter.push(&chunk.bytes) {
            parser.process_line(&line, &mut events);
        }

        for event in events.drain(..) {
            tracing::debug!(target: "hslog::main", event = event.name(), ?source, "emitting event");
            (on_event)(event);
        }
    }

    for (source, splitter) in LogSource::ALL.iter().zip(&splitters) {
        if !splitter.pending().is_empty() {
            tracing::debug!(
                target: "hslog::main",
                ?source,
                bytes = splitter.pending().len(),
                "discarding unterminated line on stop"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::Path;
    use std::time::Duration;

    fn append(path: &Path, data: &str) {
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .unwrap();
        file.write_all(data.as_bytes()).unwrap();
    }

    fn options_in(dir: &Path) -> WatcherOptions {
        let power = dir.join("Power.log");
        let achievements = dir.join("Achievements.log");
        std::fs::write(&power, "").unwrap();
        std::fs::write(&achievements, "").unwrap();
        WatcherOptions {
            log_file: power,
            log_file_achievements: achievements,
            config_file: dir.join("config").join("log.config"),
            end_of_line: "\n".into(),
        }
    }

    fn collecting_watcher(options: WatcherOptions) -> (LogWatcher, Arc<std::sync::Mutex<Vec<GameEvent>>>) {
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let seen2 = Arc::clone(&seen);
        let watcher = LogWatcher::new(
            options,
            Box::new(move |event| seen2.lock().unwrap().push(event)),
        );
        (watcher, seen)
    }

    #[tokio::test]
    async fn start_installs_config_and_stop_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let options = options_in(tmp.path());
        let config_file = options.config_file.clone();
        let (watcher, _) = collecting_watcher(options);

        assert!(!watcher.is_running().await);
        watcher.start().await.unwrap();
        assert!(watcher.is_running().await);
        assert!(config_file.exists());
        assert!(matches!(watcher.start().await, Err(WatchError::AlreadyRunning)));

        watcher.stop().await;
        assert!(!watcher.is_running().await);
        watcher.stop().await;
    }

    #[tokio::test]
    async fn both_logs_feed_one_parser() {
        let tmp = tempfile::tempdir().unwrap();
        let options = options_in(tmp.path());
        let power = options.log_file.clone();
        let achievements = options.log_file_achievements.clone();
        let (watcher, seen) = collecting_watcher(options);

        watcher.start().await.unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;

        append(&achievements, "D 15:08:54.0669559 NotifyOfCardGained: [name=Booty Bay Bookie cardId=TRL_504 type=MINION] NORMAL 1\n");
        append(&achievements, "D 15:08:54.0679811 NotifyOfCardGained: [name=Ticket Scalper cardId=TRL_015 type=MINION] NORMAL 2\n");
        append(&power, "[Zone] ZoneChangeList.ProcessChanges() - id=167 local=False [entityName=Lyra the Sunshard id=7 zone=HAND zonePos=0 cardId=UNG_963 player=1] zone from FRIENDLY DECK -> FRIENDLY HAND\n");
        // A line written in two flushes.
        append(&achievements, "D 15:08:54.0709580 NotifyOfCardGained: [name=Dragon Roar ");
        tokio::time::sleep(Duration::from_millis(700)).await;
        append(&achievements, "cardId=TRL_362 type=SPELL] NORMAL 1\n");
        append(&achievements, "D 15:08:54.0709580 NotifyOfCardGained: [name=Sharkfin Fan cardId=TRL_507 type=MINION] GOLDEN 1\n");
        append(&achievements, "D 15:08:54.0758987 NotifyOfCardGained: [name=Amani War Bear cardId=TRL_550 type=MINION] NORMAL 1\n");
        tokio::time::sleep(Duration::from_millis(1500)).await;

        watcher.stop().await;

        let seen = seen.lock().unwrap();
        let names: Vec<&str> = seen.iter().map(GameEvent::name).collect();
        assert_eq!(names, vec!["zone-change", "pack-opened"]);

        let GameEvent::PackOpened(pack) = &seen[1] else {
            panic!("expected pack-opened");
        };
        assert_eq!(pack.cards.len(), 5);
        assert_eq!(pack.cards[2].card_name, "Dragon Roar");
        assert_eq!(pack.first_log_time.as_deref(), Some("15:08:54.0669559"));
    }

    #[tokio::test]
    async fn truncation_drops_stale_fragment() {
        let tmp = tempfile::tempdir().unwrap();
        let options = options_in(tmp.path());
        let power = options.log_file.clone();
        let (watcher, seen) = collecting_watcher(options);

        watcher.start().await.unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;

        append(&power, "[Zone] ZoneChangeList.ProcessChanges() - id=9 local=False [entityName=Stale ");
        tokio::time::sleep(Duration::from_millis(700)).await;

        std::fs::write(&power, "").unwrap();
        tokio::time::sleep(Duration::from_millis(700)).await;
        append(&power, "[Zone] ZoneChangeList.ProcessChanges() - id=167 local=False [entityName=Lyra the Sunshard id=7 zone=HAND zonePos=0 cardId=UNG_963 player=1] zone from FRIENDLY DECK -> FRIENDLY HAND\n");
        tokio::time::sleep(Duration::from_millis(1000)).await;

        watcher.stop().await;

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1, "events: {seen:?}");
        let GameEvent::ZoneChange(change) = &seen[0] else {
            panic!("expected zone-change, got {:?}", seen[0]);
        };
        assert_eq!(change.card_name, "Lyra the Sunshard");
    }

    #[tokio::test]
    async fn existing_content_is_not_replayed() {
        let tmp = tempfile::tempdir().unwrap();
        let options = options_in(tmp.path());
        append(&options.log_file, "[Zone] ZoneChangeList.ProcessChanges() - id=1 local=False [entityName=Old id=1 zone=HAND zonePos=0 cardId=X player=1] zone from FRIENDLY DECK -> FRIENDLY HAND\n");
        let (watcher, seen) = collecting_watcher(options);

        watcher.start().await.unwrap();
        tokio::time::sleep(Duration::from_millis(800)).await;
        watcher.stop().await;

        assert!(seen.lock().unwrap().is_empty());
    }
}
