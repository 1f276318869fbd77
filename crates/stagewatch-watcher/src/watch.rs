//! The watch loop.
//!
//! Consumes creation events from an [`EventSource`] and dispatches each
//! created file to a [`CreatedFileHandler`] until shutdown is requested.
//!
//! Shutdown: a message on the shutdown channel stops the loop. Pending events
//! still in the source's channel are not drained.

use std::path::Path;
use std::sync::Arc;

use stagewatch_core::FailurePolicy;
use tokio::sync::mpsc;

use crate::handler::CreatedFileHandler;
use crate::source::EventSource;

/// Run the watch loop until shutdown or until the event source ends.
///
/// Per event: directory events and events whose parent is not `root` are
/// discarded; every other event triggers exactly one handler invocation.
/// Handler failures are resolved per `policy`: logged and skipped, or
/// propagated out of the loop.
pub async fn run<S: EventSource>(
    root: &Path,
    mut source: S,
    handler: Arc<dyn CreatedFileHandler>,
    policy: FailurePolicy,
    mut shutdown_rx: mpsc::Receiver<()>,
) -> anyhow::Result<()> {
    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => {
                tracing::info!("shutdown requested, stopping watch");
                return Ok(());
            }
            event = source.next_event() => {
                let Some(event) = event else {
                    tracing::info!("event source ended, stopping watch");
                    return Ok(());
                };

                if event.is_directory {
                    tracing::debug!(path = %event.path.display(), "ignoring directory creation");
                    continue;
                }

                if event.path.parent() != Some(root) {
                    tracing::debug!(path = %event.path.display(), "ignoring event outside watched directory");
                    continue;
                }

                if let Err(err) = handler.handle_created(&event.path).await {
                    match policy {
                        FailurePolicy::LogAndContinue => {
                            tracing::error!(
                                path = %event.path.display(),
                                error = %err,
                                "failed to process created file"
                            );
                        }
                        FailurePolicy::Escalate => {
                            return Err(
                                err.context(format!("failed to process {}", event.path.display()))
                            );
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::CreationEvent;
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Scripted source: replays events handed to it over a channel.
    struct ScriptedSource {
        rx: mpsc::Receiver<CreationEvent>,
    }

    #[async_trait]
    impl EventSource for ScriptedSource {
        async fn next_event(&mut self) -> Option<CreationEvent> {
            self.rx.recv().await
        }
    }

    fn scripted() -> (mpsc::Sender<CreationEvent>, ScriptedSource) {
        let (tx, rx) = mpsc::channel(16);
        (tx, ScriptedSource { rx })
    }

    fn file_event(path: &str) -> CreationEvent {
        CreationEvent {
            path: PathBuf::from(path),
            is_directory: false,
        }
    }

    #[derive(Default)]
    struct RecordingHandler {
        calls: Mutex<Vec<PathBuf>>,
    }

    #[async_trait]
    impl CreatedFileHandler for RecordingHandler {
        async fn handle_created(&self, path: &Path) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push(path.to_path_buf());
            Ok(())
        }
    }

    /// Fails on every call, counting invocations.
    #[derive(Default)]
    struct FailingHandler {
        calls: Mutex<usize>,
    }

    #[async_trait]
    impl CreatedFileHandler for FailingHandler {
        async fn handle_created(&self, _path: &Path) -> anyhow::Result<()> {
            *self.calls.lock().unwrap() += 1;
            Err(anyhow::anyhow!("transport failure"))
        }
    }

    #[tokio::test]
    async fn each_file_event_is_handled_exactly_once() {
        let (tx, source) = scripted();
        let handler = Arc::new(RecordingHandler::default());
        let (_shutdown_tx, shutdown_rx) = mpsc::channel(1);

        tx.send(file_event("/staging/a.txt")).await.unwrap();
        tx.send(file_event("/staging/b.txt")).await.unwrap();
        drop(tx);

        run(
            Path::new("/staging"),
            source,
            handler.clone(),
            FailurePolicy::LogAndContinue,
            shutdown_rx,
        )
        .await
        .unwrap();

        let calls = handler.calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![PathBuf::from("/staging/a.txt"), PathBuf::from("/staging/b.txt")]
        );
    }

    #[tokio::test]
    async fn directory_events_are_discarded() {
        let (tx, source) = scripted();
        let handler = Arc::new(RecordingHandler::default());
        let (_shutdown_tx, shutdown_rx) = mpsc::channel(1);

        tx.send(CreationEvent {
            path: PathBuf::from("/staging/sub"),
            is_directory: true,
        })
        .await
        .unwrap();
        drop(tx);

        run(
            Path::new("/staging"),
            source,
            handler.clone(),
            FailurePolicy::LogAndContinue,
            shutdown_rx,
        )
        .await
        .unwrap();

        assert!(handler.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn events_outside_root_are_discarded() {
        let (tx, source) = scripted();
        let handler = Arc::new(RecordingHandler::default());
        let (_shutdown_tx, shutdown_rx) = mpsc::channel(1);

        tx.send(file_event("/staging/sub/nested.txt")).await.unwrap();
        tx.send(file_event("/elsewhere/c.txt")).await.unwrap();
        tx.send(file_event("/staging/top.txt")).await.unwrap();
        drop(tx);

        run(
            Path::new("/staging"),
            source,
            handler.clone(),
            FailurePolicy::LogAndContinue,
            shutdown_rx,
        )
        .await
        .unwrap();

        let calls = handler.calls.lock().unwrap();
        assert_eq!(*calls, vec![PathBuf::from("/staging/top.txt")]);
    }

    #[tokio::test]
    async fn shutdown_stops_the_loop() {
        let (tx, source) = scripted();
        let handler = Arc::new(RecordingHandler::default());
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let loop_handle = tokio::spawn({
            let handler = handler.clone();
            async move {
                run(
                    Path::new("/staging"),
                    source,
                    handler,
                    FailurePolicy::LogAndContinue,
                    shutdown_rx,
                )
                .await
            }
        });

        shutdown_tx.send(()).await.unwrap();
        loop_handle.await.unwrap().unwrap();

        // The loop is gone; later events go nowhere.
        let _ = tx.send(file_event("/staging/late.txt")).await;
        assert!(handler.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn log_and_continue_survives_handler_failure() {
        let (tx, source) = scripted();
        let handler = Arc::new(FailingHandler::default());
        let (_shutdown_tx, shutdown_rx) = mpsc::channel(1);

        tx.send(file_event("/staging/a.txt")).await.unwrap();
        tx.send(file_event("/staging/b.txt")).await.unwrap();
        drop(tx);

        run(
            Path::new("/staging"),
            source,
            handler.clone(),
            FailurePolicy::LogAndContinue,
            shutdown_rx,
        )
        .await
        .unwrap();

        assert_eq!(*handler.calls.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn escalate_propagates_handler_failure() {
        let (tx, source) = scripted();
        let handler = Arc::new(FailingHandler::default());
        let (_shutdown_tx, shutdown_rx) = mpsc::channel(1);

        tx.send(file_event("/staging/a.txt")).await.unwrap();
        tx.send(file_event("/staging/b.txt")).await.unwrap();
        drop(tx);

        let result = run(
            Path::new("/staging"),
            source,
            handler.clone(),
            FailurePolicy::Escalate,
            shutdown_rx,
        )
        .await;

        assert!(result.is_err());
        assert_eq!(*handler.calls.lock().unwrap(), 1);
    }
}
