use std::sync::Arc;

use crate::connection::identity::ServiceIdentity;
use crate::printer::PrinterService;

/// Notifications delivered by the platform service manager.
///
/// Invoked on the platform's own callback thread, never from a command call.
pub trait ServiceCallbacks: Send + Sync {
    fn on_service_connected(&self, service: Arc<dyn PrinterService>);

    fn on_service_disconnected(&self);
}

/// Platform service-binding mechanism
pub trait ServiceBinder: Send + Sync {
    /// Ask the platform to connect to `identity`. Does not wait for the
    /// connection; the outcome arrives through `callbacks`, possibly before
    /// this returns. `false` means the platform refused the request outright
    /// (service absent or missing permission).
    fn bind(&self, identity: &ServiceIdentity, callbacks: Arc<dyn ServiceCallbacks>) -> bool;

    /// Release the binding
    fn unbind(&self);
}

/// Registration of the QSC scan broadcast listener
pub trait BroadcastRegistrar: Send + Sync {
    fn register(&self, action: &str);

    fn unregister(&self);
}
