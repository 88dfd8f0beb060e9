//! Persistence service: fire-and-forget page saves.
//!
//! DESIGN
//! ======
//! The editor never waits on a save. Each save is handed to its own detached
//! task and the caller gets the `JoinHandle` back only so a short-lived process
//! can drain in-flight work before exiting. There is no queue, no versioning
//! and no retry: whichever save reaches the store last wins.
//!
//! ERROR HANDLING
//! ==============
//! A failed or rejected save is logged and dropped. The in-memory page stays
//! authoritative until the next save.

use std::sync::Arc;
use std::time::Duration;

use canvas::pages::SaveResult;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::store::AlbumStore;

/// Dispatches page saves to an [`AlbumStore`] on detached tasks.
#[derive(Clone)]
pub struct SaveDispatcher {
    store: Arc<dyn AlbumStore>,
}

impl SaveDispatcher {
    #[must_use]
    pub fn new(store: Arc<dyn AlbumStore>) -> Self {
        Self { store }
    }

    /// Save `content` for `page_id` without waiting for the result.
    pub fn dispatch(&self, page_id: &str, content: String) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        let page_id = page_id.to_owned();
        tokio::spawn(async move {
            match store.save_page_content(&page_id, &content).await {
                Ok(SaveResult { success: true }) => debug!(%page_id, bytes = content.len(), "save complete"),
                Ok(SaveResult { success: false }) => warn!(%page_id, "save rejected by store"),
                Err(e) => error!(error = %e, %page_id, "save failed"),
            }
        })
    }
}

/// Wait up to `timeout` for in-flight saves. Returns how many finished.
pub async fn drain(handles: Vec<JoinHandle<()>>, timeout: Duration) -> usize {
    let total = handles.len();
    let mut finished = 0;
    let wait_all = async {
        for handle in handles {
            match handle.await {
                Ok(()) => finished += 1,
                Err(e) => error!(error = %e, "save task panicked"),
            }
        }
    };
    if tokio::time::timeout(timeout, wait_all).await.is_err() {
        warn!(finished, total, "gave up waiting for in-flight saves");
    }
    finished
}

#[cfg(test)]
#[path = "persistence_test.rs"]
mod tests;
