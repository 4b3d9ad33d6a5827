//! Subscription relay — pumps live-query snapshots into a connection's
//! outbound channel.
//!
//! DESIGN
//! ======
//! Each `notes:subscribe` request spawns one relay task. The task owns the
//! `LiveQuery` and sends every snapshot as an `item` frame correlated to the
//! original request. The `SubscriptionGuard` returned to the connection
//! aborts the task on drop, so unsubscribe, re-subscribe and disconnect all
//! release the query the same way.

use notes::Frame;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::services::notes::LiveQuery;

/// Owns a running relay task. Dropping the guard stops the task.
pub struct SubscriptionGuard {
    request_id: Uuid,
    handle: JoinHandle<()>,
}

impl SubscriptionGuard {
    /// Id of the `notes:subscribe` request this guard serves.
    #[must_use]
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    #[cfg(test)]
    pub(crate) fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        self.handle.abort();
        debug!(request_id = %self.request_id, "subscription released");
    }
}

/// Spawn a task that forwards every snapshot of `query` to `tx` as an item
/// frame replying to `request`. A query error is sent as an error frame and
/// ends the relay; a closed channel ends it silently.
#[must_use]
pub fn spawn_relay(mut query: LiveQuery, request: Frame, tx: mpsc::Sender<Frame>) -> SubscriptionGuard {
    let request_id = request.id;
    let handle = tokio::spawn(async move {
        loop {
            let frame = match query.next_snapshot().await {
                Ok(notes) => request.snapshot(&notes),
                Err(e) => {
                    warn!(request_id = %request.id, error = %e, "live query failed");
                    let _ = tx.send(request.error_from(&e)).await;
                    return;
                }
            };
            if tx.send(frame).await.is_err() {
                return;
            }
        }
    });
    SubscriptionGuard { request_id, handle }
}

#[cfg(test)]
#[path = "subscription_test.rs"]
mod tests;
