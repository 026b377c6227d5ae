use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use domain::connection::{ServiceBinder, ServiceCallbacks, ServiceIdentity};
use domain::printer::PrinterService;
use tracing::{info, warn};

#[derive(Default)]
struct BinderState {
    services: HashMap<String, Arc<dyn PrinterService>>,
    callbacks: Option<Arc<dyn ServiceCallbacks>>,
    requests: Vec<ServiceIdentity>,
    unbind_count: usize,
}

/// Service binder backed by printer services living in the same process.
///
/// Services are registered per package. A bind request for a registered
/// package connects immediately; anything else is refused like an absent
/// service would be. [`InProcessBinder::kill_service`] and
/// [`InProcessBinder::restart_service`] play the platform's role when the
/// service process dies or comes back.
#[derive(Default)]
pub struct InProcessBinder {
    state: Mutex<BinderState>,
}

impl InProcessBinder {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, BinderState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn register(&self, package: impl Into<String>, service: Arc<dyn PrinterService>) {
        self.state().services.insert(package.into(), service);
    }

    /// Every identity a bind was requested for, in order.
    pub fn requests(&self) -> Vec<ServiceIdentity> {
        self.state().requests.clone()
    }

    pub fn unbind_count(&self) -> usize {
        self.state().unbind_count
    }

    pub fn is_bound(&self) -> bool {
        self.state().callbacks.is_some()
    }

    /// Simulate the service process dying. Returns false if nothing was bound.
    pub fn kill_service(&self) -> bool {
        let callbacks = self.state().callbacks.clone();
        match callbacks {
            Some(callbacks) => {
                warn!("Printer service process died");
                callbacks.on_service_disconnected();
                true
            }
            None => false,
        }
    }

    /// Simulate the platform restarting a bound service on its own.
    pub fn restart_service(&self, package: &str) -> bool {
        let (callbacks, service) = {
            let state = self.state();
            (state.callbacks.clone(), state.services.get(package).cloned())
        };
        match (callbacks, service) {
            (Some(callbacks), Some(service)) => {
                callbacks.on_service_connected(service);
                true
            }
            _ => false,
        }
    }
}

impl ServiceBinder for InProcessBinder {
    fn bind(&self, identity: &ServiceIdentity, callbacks: Arc<dyn ServiceCallbacks>) -> bool {
        let service = {
            let mut state = self.state();
            state.requests.push(identity.clone());
            let service = state.services.get(&identity.package).cloned();
            if service.is_some() {
                state.callbacks = Some(Arc::clone(&callbacks));
            }
            service
        };

        match service {
            Some(service) => {
                info!(package = %identity.package, "In-process printer service bound");
                callbacks.on_service_connected(service);
                true
            }
            None => false,
        }
    }

    fn unbind(&self) {
        let mut state = self.state();
        state.callbacks = None;
        state.unbind_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::SimulatedPrinter;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingCallbacks {
        connected: AtomicUsize,
        disconnected: AtomicUsize,
    }

    impl ServiceCallbacks for CountingCallbacks {
        fn on_service_connected(&self, _service: Arc<dyn PrinterService>) {
            self.connected.fetch_add(1, Ordering::SeqCst);
        }

        fn on_service_disconnected(&self) {
            self.disconnected.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_bind_registered_package_connects() {
        let binder = InProcessBinder::new();
        binder.register("net.nyx.printerservice", Arc::new(SimulatedPrinter::new()));
        let callbacks = Arc::new(CountingCallbacks::default());

        assert!(binder.bind(&ServiceIdentity::from_prefix("net.nyx"), callbacks.clone()));
        assert_eq!(callbacks.connected.load(Ordering::SeqCst), 1);
        assert!(binder.is_bound());
    }

    #[test]
    fn test_bind_unknown_package_is_refused() {
        let binder = InProcessBinder::new();
        let callbacks = Arc::new(CountingCallbacks::default());

        assert!(!binder.bind(&ServiceIdentity::from_prefix("com.incar"), callbacks.clone()));
        assert_eq!(callbacks.connected.load(Ordering::SeqCst), 0);
        assert_eq!(binder.requests().len(), 1);
    }

    #[test]
    fn test_kill_and_restart() {
        let binder = InProcessBinder::new();
        binder.register("net.nyx.printerservice", Arc::new(SimulatedPrinter::new()));
        let callbacks = Arc::new(CountingCallbacks::default());
        binder.bind(&ServiceIdentity::from_prefix("net.nyx"), callbacks.clone());

        assert!(binder.kill_service());
        assert_eq!(callbacks.disconnected.load(Ordering::SeqCst), 1);
        assert!(binder.restart_service("net.nyx.printerservice"));
        assert_eq!(callbacks.connected.load(Ordering::SeqCst), 2);

        binder.unbind();
        assert!(!binder.kill_service());
        assert_eq!(binder.unbind_count(), 1);
    }
}
