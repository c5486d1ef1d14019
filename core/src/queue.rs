use anyhow::Result;
use parking_lot::{Condvar, Mutex};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::thread::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkerState {
    Idle,
    Draining,
}

struct QueueInner {
    pending: VecDeque<String>,
    members: HashSet<String>,
    state: WorkerState,
    shutdown: bool,
}

struct Shared {
    inner: Mutex<QueueInner>,
    signal: Condvar,
}

/// Deduplicated FIFO of document ids drained by a single worker thread.
///
/// The worker is the only writer against the document store, so it acts as
/// a mutex over store transactions. The worker state lives inside the same
/// mutex as the queue; there is no is-indexing flag observable outside a
/// critical section.
pub struct IndexQueue {
    shared: Arc<Shared>,
    worker: Option<JoinHandle<()>>,
}

impl IndexQueue {
    /// Spawn the worker. `handler` runs once per popped id and is expected
    /// to re-read the document's current state itself; a failed pass is
    /// logged and skipped, never retried.
    pub fn spawn<F>(handler: F) -> Self
    where
        F: Fn(&str) -> Result<()> + Send + 'static,
    {
        let shared = Arc::new(Shared {
            inner: Mutex::new(QueueInner {
                pending: VecDeque::new(),
                members: HashSet::new(),
                state: WorkerState::Idle,
                shutdown: false,
            }),
            signal: Condvar::new(),
        });
        let worker_shared = Arc::clone(&shared);
        let worker = std::thread::spawn(move || {
            loop {
                let id = {
                    let mut inner = worker_shared.inner.lock();
                    loop {
                        if inner.shutdown {
                            return;
                        }
                        if let Some(id) = inner.pending.pop_front() {
                            inner.members.remove(&id);
                            inner.state = WorkerState::Draining;
                            break id;
                        }
                        inner.state = WorkerState::Idle;
                        worker_shared.signal.notify_all();
                        worker_shared.signal.wait(&mut inner);
                    }
                };
                if let Err(err) = handler(&id) {
                    tracing::warn!(document = %id, error = %err, "indexing pass failed, skipping document");
                }
            }
        });
        Self {
            shared,
            worker: Some(worker),
        }
    }

    /// Append an id unless it is already pending.
    pub fn enqueue(&self, id: &str) {
        let mut inner = self.shared.inner.lock();
        if inner.members.insert(id.to_string()) {
            inner.pending.push_back(id.to_string());
            self.shared.signal.notify_all();
        }
    }

    /// Discard everything pending and resubmit `ids` (bulk reindex).
    pub fn replace_all(&self, ids: Vec<String>) {
        let mut inner = self.shared.inner.lock();
        inner.pending.clear();
        inner.members.clear();
        for id in ids {
            if inner.members.insert(id.clone()) {
                inner.pending.push_back(id);
            }
        }
        self.shared.signal.notify_all();
    }

    pub fn pending_len(&self) -> usize {
        self.shared.inner.lock().pending.len()
    }

    /// Block until the queue is empty and the worker has gone idle.
    pub fn wait_idle(&self) {
        let mut inner = self.shared.inner.lock();
        while !(inner.pending.is_empty() && inner.state == WorkerState::Idle) {
            self.shared.signal.wait(&mut inner);
        }
    }
}

impl Drop for IndexQueue {
    fn drop(&mut self) {
        {
            let mut inner = self.shared.inner.lock();
            inner.shutdown = true;
            self.shared.signal.notify_all();
        }
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
