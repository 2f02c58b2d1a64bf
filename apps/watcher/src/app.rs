//! Runs the log watcher and streams events to stdout.

use std::io::Write;

use hslog_game_log::{GameEvent, LogWatcher, WatcherOptions};

/// Runs the watcher until Ctrl-C.
pub async fn run(options: WatcherOptions) -> anyhow::Result<()> {
    let watcher = LogWatcher::new(options, Box::new(print_event));
    watcher.start().await?;

    tracing::info!("watching for game events, press Ctrl-C to stop");
    tokio::signal::ctrl_c().await?;
    tracing::info!("SIGINT received, shutting down");

    watcher.stop().await;
    Ok(())
}

/// Writes one event as a JSON line.
fn print_event(event: GameEvent) {
    let line = match serde_json::to_string(&event) {
        Ok(line) => line,
        Err(e) => {
            tracing::error!(event = event.name(), error = %e, "failed to serialize event");
            return;
        }
    };

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{line}").and_then(|()| stdout.flush()) {
        tracing::warn!(error = %e, "failed to write event");
    }
}
