use std::io;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use feed_logging::{feed_debug, feed_warn};
use listing_core::{CatalogQuery, FetchTicket, RowRange};

use crate::store::fetch_page_with_count;
use crate::{CatalogStore, EngineClosed, EngineEvent, FailureKind, StoreError};

enum EngineCommand {
    FetchPage {
        ticket: FetchTicket,
        query: CatalogQuery,
        range: RowRange,
    },
}

/// Executes fetch effects on a background tokio runtime and reports
/// completions over a channel. It performs no staleness checks; the feed
/// decides what to do with each completion.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(store: Arc<dyn CatalogStore>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("listing-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let store = store.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(handle_command(store, command, event_tx));
                }
                feed_debug!("engine command channel closed");
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn fetch_page(&self, ticket: FetchTicket, query: CatalogQuery, range: RowRange) {
        let _ = self.cmd_tx.send(EngineCommand::FetchPage {
            ticket,
            query,
            range,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// `Ok(None)` on timeout; `Err` once the engine thread is gone and no
    /// further events can arrive.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<EngineEvent>, EngineClosed> {
        match self.event_rx.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(EngineClosed),
        }
    }
}

/// Every command yields exactly one event, even when the fetch task panics.
async fn handle_command(
    store: Arc<dyn CatalogStore>,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::FetchPage {
            ticket,
            query,
            range,
        } => {
            let task = tokio::spawn(async move {
                fetch_page_with_count(store.as_ref(), &query, range).await
            });
            let result = match task.await {
                Ok(result) => result,
                Err(err) => Err(StoreError::new(
                    FailureKind::Unavailable,
                    format!("fetch task aborted: {err}"),
                )),
            };
            if let Err(err) = &result {
                feed_warn!("page {} fetch failed: {}", ticket.page_index, err);
            }
            let _ = event_tx.send(EngineEvent::PageFetched { ticket, result });
        }
    }
}
