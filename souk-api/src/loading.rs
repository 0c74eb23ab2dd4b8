use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;

/// Counts logical calls in flight and publishes "is anything loading"
/// through a watch channel. A guard covers the entire retry loop of one
/// call, so the signal only drops back to idle once every outstanding call
/// has fully finished.
#[derive(Clone)]
pub(crate) struct LoadingTracker {
    inner: Arc<Inner>,
}

struct Inner {
    count: Mutex<usize>,
    tx: watch::Sender<bool>,
}

impl LoadingTracker {
    pub(crate) fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            inner: Arc::new(Inner {
                count: Mutex::new(0),
                tx,
            }),
        }
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.tx.subscribe()
    }

    pub(crate) fn start(&self) -> LoadingGuard {
        self.adjust(1);
        LoadingGuard {
            tracker: self.clone(),
        }
    }

    fn adjust(&self, delta: isize) {
        // Count update and watch publish happen under one lock so two
        // overlapping calls cannot publish out of order.
        let mut count = self
            .inner
            .count
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *count = count.saturating_add_signed(delta);
        let _ = self.inner.tx.send(*count > 0);
    }
}

pub(crate) struct LoadingGuard {
    tracker: LoadingTracker,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.tracker.adjust(-1);
    }
}
