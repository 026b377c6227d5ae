use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

use domain::connection::{BroadcastRegistrar, ServiceBinder};
use domain::event::EventPublisher;
use domain::scan::ScannerLauncher;

use crate::connection::{ConnectionManager, ConnectionSettings};
use crate::printer::PrinterFacade;
use crate::scan::{EventRelay, QSC_ACTION};

/// Module lifecycle of the printer bridge
///
/// `initialize` binds the printer service and starts listening for QSC
/// broadcasts; `shutdown` undoes both exactly once.
pub struct PrinterBridge {
    connection: ConnectionManager,
    facade: PrinterFacade,
    relay: Arc<EventRelay>,
    registrar: Arc<dyn BroadcastRegistrar>,
    initialized: AtomicBool,
    torn_down: AtomicBool,
}

impl PrinterBridge {
    pub fn new(
        binder: Arc<dyn ServiceBinder>,
        registrar: Arc<dyn BroadcastRegistrar>,
        launcher: Arc<dyn ScannerLauncher>,
        publisher: Arc<dyn EventPublisher>,
        settings: ConnectionSettings,
    ) -> Self {
        let connection = ConnectionManager::new(binder, settings);
        let facade = PrinterFacade::new(connection.clone(), launcher);
        Self {
            connection,
            facade,
            relay: Arc::new(EventRelay::new(publisher)),
            registrar,
            initialized: AtomicBool::new(false),
            torn_down: AtomicBool::new(false),
        }
    }

    pub fn initialize(&self) {
        if self.torn_down.load(Ordering::SeqCst) || self.initialized.swap(true, Ordering::SeqCst) {
            return;
        }
        info!("🖨️ Printer bridge starting");
        self.connection.bind();
        self.registrar.register(QSC_ACTION);
    }

    pub fn shutdown(&self) {
        if self.torn_down.swap(true, Ordering::SeqCst) {
            return;
        }
        info!("🖨️ Printer bridge shutting down");
        self.connection.unbind();
        if self.initialized.load(Ordering::SeqCst) {
            self.registrar.unregister();
        }
    }

    pub fn commands(&self) -> &PrinterFacade {
        &self.facade
    }

    pub fn connection(&self) -> &ConnectionManager {
        &self.connection
    }

    /// Entry point for platform scan notifications
    pub fn relay(&self) -> Arc<EventRelay> {
        Arc::clone(&self.relay)
    }
}
