//! Wholesale-replaced snapshot holder with cancellable refresh.
//!
//! An aggregator publishes its output as one immutable value; readers only
//! ever observe a complete snapshot, never a partially updated one. At most
//! one refresh task is in flight per cell: starting a new refresh supersedes
//! the outstanding one, which is aborted and barred from publishing, so a
//! slow stale fetch can never overwrite a fresher snapshot after the driving
//! input (typically the identity) has changed.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Snapshot holder. One writer (the cell itself), any number of readers.
#[derive(Debug)]
pub struct SnapshotCell<T> {
    tx: watch::Sender<T>,
    inflight: Mutex<Inflight>,
}

#[derive(Debug, Default)]
struct Inflight {
    // Bumped on every refresh and cancel; a refresh task may publish only
    // while its captured generation is still current.
    generation: u64,
    key: Option<Uuid>,
    handle: Option<JoinHandle<()>>,
}

impl<T: Clone + Send + Sync + 'static> SnapshotCell<T> {
    /// Create a cell holding `initial` (typically a loading snapshot).
    pub fn new(initial: T) -> Arc<Self> {
        let (tx, _rx) = watch::channel(initial);
        Arc::new(Self {
            tx,
            inflight: Mutex::new(Inflight::default()),
        })
    }

    /// Clone of the latest published snapshot.
    pub fn current(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Watch the cell for newly published snapshots.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Replace the snapshot wholesale, outside of any refresh task.
    pub fn publish(&self, snapshot: T) {
        self.tx.send_replace(snapshot);
    }

    /// Invalidate and abort the in-flight refresh, if any, publishing nothing.
    pub fn cancel(&self) {
        let mut guard = self.lock_inflight();
        guard.generation += 1;
        guard.key = None;
        if let Some(handle) = guard.handle.take() {
            handle.abort();
        }
    }

    /// Start a refresh keyed by its driving input. Any outstanding refresh is
    /// invalidated and aborted first; the new task publishes its snapshot on
    /// completion.
    pub fn refresh<F>(self: &Arc<Self>, key: Option<Uuid>, fetch: F)
    where
        F: Future<Output = T> + Send + 'static,
    {
        let mut guard = self.lock_inflight();
        guard.generation += 1;
        let generation = guard.generation;
        if let Some(stale) = guard.handle.take() {
            stale.abort();
            tracing::debug!(stale_key = ?guard.key, new_key = ?key, "Superseded in-flight snapshot refresh");
        }
        guard.key = key;

        let cell = Arc::clone(self);
        guard.handle = Some(tokio::spawn(async move {
            let snapshot = fetch.await;
            // Abort cannot stop a task already inside its final poll, so the
            // publish re-checks under the lock that no newer refresh or
            // cancel has superseded this one.
            let inflight = cell.lock_inflight();
            if inflight.generation == generation {
                cell.tx.send_replace(snapshot);
            }
        }));
    }

    fn lock_inflight(&self) -> std::sync::MutexGuard<'_, Inflight> {
        self.inflight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::sleep;

    #[tokio::test]
    async fn publish_replaces_wholesale() {
        let cell = SnapshotCell::new(0_u64);
        assert_eq!(cell.current(), 0);
        cell.publish(42);
        assert_eq!(cell.current(), 42);
    }

    #[tokio::test]
    async fn refresh_publishes_on_completion() {
        let cell = SnapshotCell::new(0_u64);
        let mut rx = cell.subscribe();

        cell.refresh(None, async { 7 });
        rx.changed().await.unwrap();
        assert_eq!(cell.current(), 7);
    }

    #[tokio::test]
    async fn new_refresh_aborts_stale_one() {
        let cell = SnapshotCell::new("initial".to_string());
        let mut rx = cell.subscribe();

        let slow_key = Some(Uuid::new_v4());
        cell.refresh(slow_key, async {
            sleep(Duration::from_millis(400)).await;
            "stale".to_string()
        });
        cell.refresh(Some(Uuid::new_v4()), async { "fresh".to_string() });

        rx.changed().await.unwrap();
        assert_eq!(cell.current(), "fresh");

        // The aborted task must never land, even after its sleep elapses.
        sleep(Duration::from_millis(500)).await;
        assert_eq!(cell.current(), "fresh");
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn stale_refresh_past_abort_cannot_overwrite_fresher_snapshot() {
        let cell = SnapshotCell::new("initial".to_string());
        let (entered_tx, entered_rx) = tokio::sync::oneshot::channel();

        // The stale fetch has no await after signalling, so once it signals
        // it is inside the poll that produces its value and abort can no
        // longer stop it.
        cell.refresh(Some(Uuid::new_v4()), async move {
            entered_tx.send(()).unwrap();
            std::thread::sleep(Duration::from_millis(300));
            "stale".to_string()
        });

        entered_rx.await.unwrap();
        cell.refresh(Some(Uuid::new_v4()), async { "fresh".to_string() });

        sleep(Duration::from_millis(600)).await;
        assert_eq!(cell.current(), "fresh");
    }

    #[tokio::test]
    async fn cancel_leaves_last_snapshot_in_place() {
        let cell = SnapshotCell::new(1_u64);
        cell.refresh(None, async {
            sleep(Duration::from_millis(400)).await;
            2
        });
        cell.cancel();

        sleep(Duration::from_millis(500)).await;
        assert_eq!(cell.current(), 1);
    }
}
