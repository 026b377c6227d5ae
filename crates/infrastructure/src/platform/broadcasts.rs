use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use domain::connection::BroadcastRegistrar;
use tracing::{debug, info};

#[derive(Default)]
struct Registrations {
    actions: HashSet<String>,
    unregister_count: usize,
}

/// Broadcast listener registry for hosts that deliver broadcasts in-process.
#[derive(Default)]
pub struct InProcessBroadcasts {
    inner: Mutex<Registrations>,
}

impl InProcessBroadcasts {
    pub fn new() -> Self {
        Self::default()
    }

    fn inner(&self) -> MutexGuard<'_, Registrations> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Whether a broadcast with `action` would reach the listener.
    pub fn accepts(&self, action: &str) -> bool {
        self.inner().actions.contains(action)
    }

    pub fn unregister_count(&self) -> usize {
        self.inner().unregister_count
    }
}

impl BroadcastRegistrar for InProcessBroadcasts {
    fn register(&self, action: &str) {
        info!(action, "Listening for scan broadcasts");
        self.inner().actions.insert(action.to_string());
    }

    fn unregister(&self) {
        let mut inner = self.inner();
        inner.actions.clear();
        inner.unregister_count += 1;
        debug!("Scan broadcast listener removed");
    }
}
