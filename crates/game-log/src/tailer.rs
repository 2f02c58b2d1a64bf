//! Growth-only file tailer.
//!
//! Watches a single log file and delivers only the bytes appended since the
//! previous read. A shrinking file (truncation or rotation) is treated as
//! new content from offset 0. Change detection uses native notifications on
//! the parent directory, backed by a fallback poll interval.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use notify_debouncer_mini::{DebounceEventResult, Debouncer, new_debouncer};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Bytes newly available in the tailed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub bytes: Vec<u8>,
    /// The file shrank since the previous delivery and `bytes` starts at
    /// offset 0 of the new content.
    pub truncated: bool,
}

/// Callback invoked with each new chunk.
pub type OnChunkFn = Box<dyn FnMut(Chunk) + Send + 'static>;

/// Fallback interval between size checks when no notification arrives.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Window used to coalesce bursts of filesystem notifications.
const DEBOUNCE_TIMEOUT: Duration = Duration::from_millis(50);

/// Tails one file. Consumed by [`FileTailer::start`].
pub struct FileTailer {
    path: PathBuf,
    poll_interval: Duration,
}

impl FileTailer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            poll_interval: POLL_INTERVAL,
        }
    }

    /// Overrides the fallback poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Starts tailing on the current tokio runtime.
    ///
    /// Only content appended after this call is delivered. If the file does
    /// not exist yet, its whole content is delivered once it appears.
    pub fn start(self, on_chunk: OnChunkFn) -> TailHandle {
        let cancel = CancellationToken::new();
        let task = tokio::spawn(tail_file(
            self.path,
            self.poll_interval,
            on_chunk,
            cancel.clone(),
        ));

        TailHandle {
            cancel,
            task: Some(task),
        }
    }
}

/// Handle to a running tail. Dropping it cancels the tail without waiting.
pub struct TailHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl TailHandle {
    /// Stops the tail. No chunk is delivered after this returns.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!(target: "hslog::tailer", error = %e, "tail task ended abnormally");
            }
        }
    }
}

impl Drop for TailHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Read position within the tailed file.
#[derive(Debug)]
struct ByteCursor {
    offset: u64,
    /// A shrink was observed but no bytes have been delivered since.
    pending_truncation: bool,
}

impl ByteCursor {
    fn new(offset: u64) -> Self {
        Self {
            offset,
            pending_truncation: false,
        }
    }

    /// Reads everything past the last known size.
    ///
    /// Returns `Ok(None)` when nothing new is available. On error the offset
    /// is left untouched so the next call retries the same range.
    fn read_new(&mut self, path: &Path) -> std::io::Result<Option<Chunk>> {
        let mut file = File::open(path)?;
        let size = file.metadata()?.len();

        let start = if size >= self.offset {
            self.offset
        } else {
            self.pending_truncation = true;
            0
        };

        let mut bytes = Vec::with_capacity((size - start) as usize);
        file.seek(SeekFrom::Start(start))?;
        (&mut file).take(size - start).read_to_end(&mut bytes)?;
        self.offset = start + bytes.len() as u64;

        if bytes.is_empty() {
            return Ok(None);
        }

        let truncated = std::mem::take(&mut self.pending_truncation);
        Ok(Some(Chunk { bytes, truncated }))
    }
}

async fn tail_file(
    path: PathBuf,
    poll_every: Duration,
    mut on_chunk: OnChunkFn,
    cancel: CancellationToken,
) {
    let initial = match std::fs::metadata(&path) {
        Ok(meta) => meta.len(),
        Err(e) => {
            tracing::debug!(
                target: "hslog::tailer",
                path = %path.display(),
                error = %e,
                "log file not readable yet, starting from offset 0"
            );
            0
        }
    };
    let mut cursor = ByteCursor::new(initial);

    let (changed_tx, mut changed_rx) = mpsc::unbounded_channel();
    // Kept alive for the lifetime of the loop; dropping it stops notifications.
    let _debouncer = watch_parent(&path, changed_tx);

    let mut poll_interval = tokio::time::interval(poll_every);
    poll_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    tracing::info!(target: "hslog::tailer", path = %path.display(), offset = initial, "tailing log file");

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            Some(()) = changed_rx.recv() => {}
            _ = poll_interval.tick() => {}
        }

        let chunk = match cursor.read_new(&path) {
            Ok(Some(chunk)) => chunk,
            Ok(None) => continue,
            Err(e) => {
                tracing::debug!(
                    target: "hslog::tailer",
                    path = %path.display(),
                    error = %e,
                    "log file unavailable, retrying on next change"
                );
                continue;
            }
        };

        // A read that raced with stop() is discarded.
        if cancel.is_cancelled() {
            break;
        }

        if chunk.truncated {
            tracing::info!(target: "hslog::tailer", path = %path.display(), "log file truncated, reading from start");
        }
        on_chunk(chunk);
    }

    tracing::debug!(target: "hslog::tailer", path = %path.display(), "tail stopped");
}

/// Registers a non-recursive watch on the file's directory.
///
/// Returns `None` when the watch cannot be set up; the tail then relies on
/// the poll interval alone.
fn watch_parent(
    path: &Path,
    changed: mpsc::UnboundedSender<()>,
) -> Option<Debouncer<RecommendedWatcher>> {
    let file_name = path.file_name()?.to_os_string();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let handler = move |res: DebounceEventResult| match res {
        Ok(events) => {
            if events
                .iter()
                .any(|e| e.path.file_name() == Some(file_name.as_os_str()))
            {
                let _ = changed.send(());
            }
        }
        Err(error) => {
            tracing::debug!(target: "hslog::tailer", ?error, "file watch error");
        }
    };

    let mut debouncer = match new_debouncer(DEBOUNCE_TIMEOUT, handler) {
        Ok(d) => d,
        Err(e) => {
            tracing::warn!(target: "hslog::tailer", error = %e, "file notifications unavailable, polling only");
            return None;
        }
    };

    if let Err(e) = debouncer
        .watcher()
        .watch(&parent, RecursiveMode::NonRecursive)
    {
        tracing::warn!(
            target: "hslog::tailer",
            dir = %parent.display(),
            error = %e,
            "failed to watch log directory, polling only"
        );
        return None;
    }

    Some(debouncer)
}
