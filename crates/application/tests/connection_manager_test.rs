use application::connection::{ConnectionManager, ConnectionSettings};
use domain::connection::{
    ConnectionState, DeviceProfile, ServiceBinder, ServiceCallbacks, ServiceIdentity,
};
use domain::printer::PrinterService;
use infrastructure::SimulatedPrinter;
use mockall::mock;
use std::sync::{Arc, Mutex};
use tokio::time::{Duration, sleep};

mock! {
    pub Binder {}

    impl ServiceBinder for Binder {
        fn bind(&self, identity: &ServiceIdentity, callbacks: Arc<dyn ServiceCallbacks>) -> bool;
        fn unbind(&self);
    }
}

type CallbackSlot = Arc<Mutex<Option<Arc<dyn ServiceCallbacks>>>>;

/// Binder that connects synchronously on every bind and keeps the latest
/// callbacks so tests can play the platform.
fn connecting_binder(times: usize, slot: CallbackSlot) -> MockBinder {
    let service: Arc<dyn PrinterService> = Arc::new(SimulatedPrinter::new());
    let mut binder = MockBinder::new();
    binder
        .expect_bind()
        .times(times)
        .returning(move |_, callbacks| {
            *slot.lock().unwrap() = Some(Arc::clone(&callbacks));
            callbacks.on_service_connected(Arc::clone(&service));
            true
        });
    binder
}

fn callbacks(slot: &CallbackSlot) -> Arc<dyn ServiceCallbacks> {
    slot.lock().unwrap().clone().expect("bind was never requested")
}

#[tokio::test]
async fn test_bind_success_marks_bound() {
    let slot = CallbackSlot::default();
    let manager = ConnectionManager::new(
        Arc::new(connecting_binder(1, slot.clone())),
        ConnectionSettings::default(),
    );

    manager.bind();

    assert_eq!(manager.state(), ConnectionState::Bound);
    assert!(manager.is_bound());
    assert!(manager.service().is_some());
    assert_eq!(manager.bind_attempts(), 1);
}

#[tokio::test]
async fn test_repeated_bind_while_bound_is_ignored() {
    let slot = CallbackSlot::default();
    let manager = ConnectionManager::new(
        Arc::new(connecting_binder(1, slot.clone())),
        ConnectionSettings::default(),
    );

    manager.bind();
    manager.bind();
    manager.bind();

    assert_eq!(manager.bind_attempts(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_refused_bind_does_not_retry() {
    let mut binder = MockBinder::new();
    binder.expect_bind().times(1).returning(|_, _| false);
    let manager = ConnectionManager::new(Arc::new(binder), ConnectionSettings::default());

    manager.bind();

    assert_eq!(manager.state(), ConnectionState::Unbound);
    assert!(manager.service().is_none());
    assert!(!manager.retry_pending());

    sleep(Duration::from_secs(10)).await;
    assert_eq!(manager.bind_attempts(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_reconnect_fires_once_after_delay() {
    let slot = CallbackSlot::default();
    let manager = ConnectionManager::new(
        Arc::new(connecting_binder(2, slot.clone())),
        ConnectionSettings::default(),
    );
    manager.bind();

    callbacks(&slot).on_service_disconnected();

    assert_eq!(manager.state(), ConnectionState::Disconnected);
    assert!(manager.service().is_none());
    assert!(manager.retry_pending());

    sleep(Duration::from_millis(1900)).await;
    assert_eq!(manager.bind_attempts(), 1);

    sleep(Duration::from_millis(200)).await;
    assert_eq!(manager.bind_attempts(), 2);
    assert_eq!(manager.state(), ConnectionState::Bound);
    assert!(!manager.retry_pending());
}

#[tokio::test(start_paused = true)]
async fn test_rapid_disconnects_schedule_one_retry() {
    let slot = CallbackSlot::default();
    let manager = ConnectionManager::new(
        Arc::new(connecting_binder(2, slot.clone())),
        ConnectionSettings::default(),
    );
    manager.bind();

    let platform = callbacks(&slot);
    platform.on_service_disconnected();
    sleep(Duration::from_millis(500)).await;
    platform.on_service_disconnected();
    platform.on_service_disconnected();

    sleep(Duration::from_secs(10)).await;
    assert_eq!(manager.bind_attempts(), 2);
    assert!(manager.is_bound());
}

#[tokio::test(start_paused = true)]
async fn test_platform_reconnect_cancels_retry() {
    let slot = CallbackSlot::default();
    let manager = ConnectionManager::new(
        Arc::new(connecting_binder(1, slot.clone())),
        ConnectionSettings::default(),
    );
    manager.bind();

    let platform = callbacks(&slot);
    platform.on_service_disconnected();
    assert!(manager.retry_pending());

    platform.on_service_connected(Arc::new(SimulatedPrinter::new()));
    assert!(!manager.retry_pending());
    assert!(manager.is_bound());

    sleep(Duration::from_secs(10)).await;
    assert_eq!(manager.bind_attempts(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_unbind_cancels_pending_retry() {
    let slot = CallbackSlot::default();
    let mut binder = connecting_binder(1, slot.clone());
    binder.expect_unbind().times(1).return_const(());
    let manager = ConnectionManager::new(Arc::new(binder), ConnectionSettings::default());
    manager.bind();

    callbacks(&slot).on_service_disconnected();
    manager.unbind();

    assert_eq!(manager.state(), ConnectionState::Released);
    assert!(!manager.retry_pending());

    sleep(Duration::from_secs(10)).await;
    assert_eq!(manager.bind_attempts(), 1);
}

#[tokio::test]
async fn test_unbind_is_idempotent_and_final() {
    let slot = CallbackSlot::default();
    let mut binder = connecting_binder(1, slot.clone());
    binder.expect_unbind().times(1).return_const(());
    let manager = ConnectionManager::new(Arc::new(binder), ConnectionSettings::default());
    manager.bind();

    manager.unbind();
    manager.unbind();
    manager.bind();

    // A late platform callback must not resurrect the connection.
    callbacks(&slot).on_service_connected(Arc::new(SimulatedPrinter::new()));
    callbacks(&slot).on_service_disconnected();

    assert_eq!(manager.state(), ConnectionState::Released);
    assert!(manager.service().is_none());
    assert_eq!(manager.bind_attempts(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_custom_reconnect_delay() {
    let slot = CallbackSlot::default();
    let settings = ConnectionSettings {
        reconnect_delay: Duration::from_millis(250),
        ..ConnectionSettings::default()
    };
    let manager = ConnectionManager::new(Arc::new(connecting_binder(2, slot.clone())), settings);
    manager.bind();

    callbacks(&slot).on_service_disconnected();
    sleep(Duration::from_millis(300)).await;

    assert_eq!(manager.bind_attempts(), 2);
}

#[tokio::test]
async fn test_identity_override_selects_alternate_prefix() {
    let mut binder = MockBinder::new();
    binder
        .expect_bind()
        .withf(|identity, _| {
            identity.package == "com.incar.printerservice"
                && identity.action == "com.incar.printerservice.IPrinterService"
        })
        .times(1)
        .returning(|_, _| true);

    let settings = ConnectionSettings {
        device: DeviceProfile {
            sdk_int: Some(33),
            soc_model: Some("SC9863A".to_string()),
        },
        ..ConnectionSettings::default()
    };
    let manager = ConnectionManager::new(Arc::new(binder), settings);

    assert_eq!(manager.identity().package, "com.incar.printerservice");
    manager.bind();
    // Bound only once the platform calls back.
    assert_eq!(manager.state(), ConnectionState::Binding);
}

#[tokio::test]
async fn test_default_identity_for_other_devices() {
    let mut binder = MockBinder::new();
    binder
        .expect_bind()
        .withf(|identity, _| identity.package == "net.nyx.printerservice")
        .times(1)
        .returning(|_, _| true);

    let settings = ConnectionSettings {
        device: DeviceProfile {
            sdk_int: Some(33),
            soc_model: Some("RK3566".to_string()),
        },
        ..ConnectionSettings::default()
    };
    let manager = ConnectionManager::new(Arc::new(binder), settings);
    manager.bind();
}
