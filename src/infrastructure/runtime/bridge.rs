//! Runtime bridge - connects the sync TUI thread with an async Tokio runtime
//!
//! The TUI thread sends commands and polls events without blocking. All
//! network work happens on a dedicated thread running its own runtime.

use std::sync::mpsc::{self, Receiver};
use std::thread;

use tokio::runtime::Runtime;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tracing::error;

use crate::domain::ListingRecord;
use crate::infrastructure::listings::ListingSource;
use crate::infrastructure::runtime::worker::run_async_worker;

/// Commands sent from the TUI to the async worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeCommand {
    /// Fetch up to `limit` listings
    FetchListings { limit: usize },
    /// Shutdown the worker
    Shutdown,
}

/// Events sent from the async worker to the TUI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeEvent {
    /// Listings fetched and normalized
    ListingsLoaded { listings: Vec<ListingRecord> },
    /// The fetch failed; `message` is ready to show
    ListingsFailed { message: String },
}

/// Bridge between sync TUI thread and async Tokio runtime
pub struct RuntimeBridge {
    cmd_tx: UnboundedSender<RuntimeCommand>,
    evt_rx: Receiver<RuntimeEvent>,
}

impl RuntimeBridge {
    /// Spawn the worker thread. `seed` makes price/location synthesis repeatable.
    pub fn new(source: Box<dyn ListingSource>, seed: Option<u64>) -> anyhow::Result<Self> {
        let (cmd_tx, cmd_rx) = unbounded_channel::<RuntimeCommand>();
        let (evt_tx, evt_rx) = mpsc::channel::<RuntimeEvent>();
        let runtime = Runtime::new()?;

        thread::Builder::new()
            .name("marketdash-worker".to_string())
            .spawn(move || {
                runtime.block_on(async {
                    if let Err(err) = run_async_worker(source, seed, cmd_rx, evt_tx).await {
                        error!("worker exited: {err:#}");
                    }
                });
            })?;

        Ok(Self { cmd_tx, evt_rx })
    }

    /// Send a command to the async worker
    pub fn send(&self, cmd: RuntimeCommand) -> anyhow::Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| anyhow::anyhow!("Worker channel closed"))
    }

    /// Poll for events (non-blocking)
    pub fn poll_events(&self) -> Vec<RuntimeEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.evt_rx.try_recv() {
            events.push(evt);
        }
        events
    }
}

impl Drop for RuntimeBridge {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(RuntimeCommand::Shutdown);
    }
}
