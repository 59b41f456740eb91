//! Async worker - runs in the Tokio runtime and performs listing fetches

use std::sync::mpsc::Sender;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};

use crate::infrastructure::listings::{fetch_listings, ListingSource};
use crate::infrastructure::runtime::bridge::{RuntimeCommand, RuntimeEvent};

/// Run the async worker loop until shutdown or until the TUI side goes away
pub async fn run_async_worker(
    source: Box<dyn ListingSource>,
    seed: Option<u64>,
    mut cmd_rx: UnboundedReceiver<RuntimeCommand>,
    evt_tx: Sender<RuntimeEvent>,
) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            RuntimeCommand::Shutdown => {
                debug!("worker shutting down");
                return Ok(());
            }
            RuntimeCommand::FetchListings { limit } => {
                let event = match fetch_listings(source.as_ref(), limit, &mut rng).await {
                    Ok(listings) => RuntimeEvent::ListingsLoaded { listings },
                    Err(err) => RuntimeEvent::ListingsFailed {
                        message: err.user_message().to_string(),
                    },
                };
                if evt_tx.send(event).is_err() {
                    info!("dashboard gone, dropping fetch result");
                    return Ok(());
                }
            }
        }
    }

    Ok(())
}
