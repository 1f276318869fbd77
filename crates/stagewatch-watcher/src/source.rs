//! Creation-event sources.
//!
//! [`NotifyEventSource`] subscribes to the platform filesystem notification
//! facility through `notify` and forwards creation events into a bounded
//! channel. Dropping the source cancels the underlying watch; pending events
//! are not drained.

use async_trait::async_trait;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::mpsc;

/// Watch setup errors
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("Watched path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Failed to initialize filesystem watch: {0}")]
    Init(#[from] notify::Error),
}

/// A filesystem entry appeared under the watched directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationEvent {
    /// Path of the created entry.
    pub path: PathBuf,
    /// Whether the entry is a directory. Directory events are discarded by
    /// the watch loop.
    pub is_directory: bool,
}

/// Source of creation events for a single directory.
///
/// "Subscribe to creation events under path P, receive entries until
/// cancelled." Implementations deliver events until the subscription ends,
/// then return `None`.
#[async_trait]
pub trait EventSource: Send {
    /// Next creation event, or `None` once the subscription has ended.
    async fn next_event(&mut self) -> Option<CreationEvent>;
}

/// Production event source backed by `notify`.
///
/// Watches a single directory non-recursively. Raw notifications arrive on
/// notify's dispatch thread; creation events are forwarded through a bounded
/// channel. While the receiver is busy (an upload in flight), the dispatch
/// thread blocks on a full channel, so the platform facility's own buffering
/// decides whether further events queue or drop.
pub struct NotifyEventSource {
    rx: mpsc::Receiver<CreationEvent>,
    // Held so the subscription stays registered; dropping it cancels the watch.
    _watcher: RecommendedWatcher,
}

impl NotifyEventSource {
    /// Start watching `root` (non-recursively) for created entries.
    pub fn new(root: &Path, channel_capacity: usize) -> Result<Self, WatchError> {
        if !root.is_dir() {
            return Err(WatchError::NotADirectory(root.to_path_buf()));
        }

        let (tx, rx) = mpsc::channel(channel_capacity);

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) => {
                    if matches!(event.kind, EventKind::Create(_)) {
                        for path in event.paths {
                            let is_directory = path.is_dir();
                            // blocking_send: this runs on notify's dispatch
                            // thread, never on the async runtime. A closed
                            // receiver means shutdown is underway.
                            let _ = tx.blocking_send(CreationEvent { path, is_directory });
                        }
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %err, "filesystem watch error");
                }
            },
            notify::Config::default(),
        )?;

        watcher.watch(root, RecursiveMode::NonRecursive)?;

        tracing::info!(path = %root.display(), "watching directory for new files");

        Ok(NotifyEventSource {
            rx,
            _watcher: watcher,
        })
    }
}

#[async_trait]
impl EventSource for NotifyEventSource {
    async fn next_event(&mut self) -> Option<CreationEvent> {
        self.rx.recv().await
    }
}
