use std::sync::{Arc, Mutex, MutexGuard, RwLock, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use domain::connection::{
    ConnectionState, DeviceProfile, IdentityTable, ServiceBinder, ServiceCallbacks,
    ServiceIdentity,
};
use domain::printer::PrinterService;

/// Fixed delay between a connection loss and the next bind attempt.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub identities: IdentityTable,
    pub device: DeviceProfile,
    pub reconnect_delay: Duration,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            identities: IdentityTable::default(),
            device: DeviceProfile::default(),
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
        }
    }
}

/// Owns the binding to the external printer service.
///
/// The service handle is written only by the platform callbacks and read by
/// every command through [`ConnectionManager::service`], which returns a
/// snapshot so no lock is held across a forwarded call.
///
/// Reconnects are indefinite and fixed-interval: each connection loss
/// schedules at most one pending bind attempt, cancelled by teardown.
#[derive(Clone)]
pub struct ConnectionManager {
    inner: Arc<Inner>,
}

struct Inner {
    binder: Arc<dyn ServiceBinder>,
    settings: ConnectionSettings,
    service: RwLock<Option<Arc<dyn PrinterService>>>,
    lifecycle: Mutex<Lifecycle>,
    shutdown: CancellationToken,
    runtime: Handle,
}

#[derive(Default)]
struct Lifecycle {
    state: ConnectionState,
    pending_retry: Option<CancellationToken>,
    bind_attempts: u64,
}

/// Callback target handed to the binder. Holds a weak reference so the
/// binder never keeps a torn-down manager alive.
struct Callbacks {
    inner: Weak<Inner>,
}

impl ConnectionManager {
    /// Create a manager bound to the current Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn new(binder: Arc<dyn ServiceBinder>, settings: ConnectionSettings) -> Self {
        Self::with_runtime(binder, settings, Handle::current())
    }

    pub fn with_runtime(
        binder: Arc<dyn ServiceBinder>,
        settings: ConnectionSettings,
        runtime: Handle,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                binder,
                settings,
                service: RwLock::new(None),
                lifecycle: Mutex::new(Lifecycle::default()),
                shutdown: CancellationToken::new(),
                runtime,
            }),
        }
    }

    /// Request a connection. Non-blocking and safe to call repeatedly.
    pub fn bind(&self) {
        self.inner.bind();
    }

    /// Release the binding. Only the first call has an effect; afterwards no
    /// reconnect fires, including one already scheduled.
    pub fn unbind(&self) {
        self.inner.unbind();
    }

    /// Snapshot of the current service handle
    pub fn service(&self) -> Option<Arc<dyn PrinterService>> {
        self.inner.snapshot()
    }

    pub fn state(&self) -> ConnectionState {
        self.inner.lifecycle().state
    }

    pub fn is_bound(&self) -> bool {
        self.inner.snapshot().is_some()
    }

    /// Whether a reconnect attempt is scheduled
    pub fn retry_pending(&self) -> bool {
        self.inner.lifecycle().pending_retry.is_some()
    }

    /// Number of bind requests issued to the platform so far
    pub fn bind_attempts(&self) -> u64 {
        self.inner.lifecycle().bind_attempts
    }

    /// Identity the next bind request would target
    pub fn identity(&self) -> ServiceIdentity {
        self.inner.resolve_identity()
    }
}

impl Inner {
    fn lifecycle(&self) -> MutexGuard<'_, Lifecycle> {
        self.lifecycle.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn snapshot(&self) -> Option<Arc<dyn PrinterService>> {
        self.service
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn store(&self, service: Option<Arc<dyn PrinterService>>) {
        *self.service.write().unwrap_or_else(|e| e.into_inner()) = service;
    }

    fn resolve_identity(&self) -> ServiceIdentity {
        self.settings.identities.resolve(&self.settings.device)
    }

    fn bind(self: &Arc<Self>) {
        {
            let mut lifecycle = self.lifecycle();
            match lifecycle.state.to_binding() {
                Ok(next) => lifecycle.state = next,
                Err(_) if lifecycle.state.is_released() => {
                    debug!("Bind requested after teardown, ignoring");
                    return;
                }
                Err(_) => {
                    debug!(state = ?lifecycle.state, "Bind already in progress");
                    return;
                }
            }
            lifecycle.bind_attempts += 1;
        }

        let identity = self.resolve_identity();
        info!(
            package = %identity.package,
            action = %identity.action,
            "🔌 Binding printer service..."
        );

        let callbacks: Arc<dyn ServiceCallbacks> = Arc::new(Callbacks {
            inner: Arc::downgrade(self),
        });

        // The binder may call back synchronously, so no lock is held here.
        if !self.binder.bind(&identity, callbacks) {
            error!(
                package = %identity.package,
                "Bind printer service failed, please check the device"
            );
            let mut lifecycle = self.lifecycle();
            if lifecycle.state == ConnectionState::Binding {
                lifecycle.state = ConnectionState::Unbound;
            }
        }
    }

    fn on_connected(&self, service: Arc<dyn PrinterService>) {
        let mut lifecycle = self.lifecycle();
        match lifecycle.state.to_bound() {
            Ok(next) => lifecycle.state = next,
            Err(e) => {
                warn!(state = ?lifecycle.state, "Ignoring service connection: {}", e);
                return;
            }
        }
        if let Some(retry) = lifecycle.pending_retry.take() {
            retry.cancel();
        }
        self.store(Some(service));
        info!("✅ Printer service connected");
    }

    fn on_disconnected(self: &Arc<Self>) {
        let mut lifecycle = self.lifecycle();
        match lifecycle.state.to_disconnected() {
            Ok(next) => lifecycle.state = next,
            Err(_) => {
                debug!("Disconnect after teardown, ignoring");
                return;
            }
        }
        self.store(None);

        if lifecycle.pending_retry.is_some() {
            debug!("Reconnect already scheduled");
            return;
        }

        let delay = self.settings.reconnect_delay;
        warn!("❌ Printer service disconnected. Rebinding in {:?}...", delay);

        let token = self.shutdown.child_token();
        lifecycle.pending_retry = Some(token.clone());
        drop(lifecycle);

        let inner = Arc::clone(self);
        self.runtime.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!("Scheduled rebind cancelled");
                }
                _ = tokio::time::sleep(delay) => {
                    {
                        let mut lifecycle = inner.lifecycle();
                        if token.is_cancelled() {
                            return;
                        }
                        lifecycle.pending_retry = None;
                    }
                    inner.bind();
                }
            }
        });
    }

    fn unbind(&self) {
        {
            let mut lifecycle = self.lifecycle();
            if lifecycle.state.is_released() {
                debug!("Printer service already released");
                return;
            }
            lifecycle.state = lifecycle.state.to_released();
            if let Some(retry) = lifecycle.pending_retry.take() {
                retry.cancel();
            }
        }
        self.shutdown.cancel();
        self.store(None);
        self.binder.unbind();
        info!("🔌 Printer service released");
    }
}

impl ServiceCallbacks for Callbacks {
    fn on_service_connected(&self, service: Arc<dyn PrinterService>) {
        if let Some(inner) = self.inner.upgrade() {
            inner.on_connected(service);
        }
    }

    fn on_service_disconnected(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.on_disconnected();
        }
    }
}
