use std::sync::Arc;

use tracing::{debug, warn};

use domain::event::{EventPublisher, ScanEvent};
use domain::scan::SCAN_REQUEST_CODE;

/// Broadcast action carrying infrared / QSC scan data.
pub const QSC_ACTION: &str = "com.android.NYX_QSC_DATA";

/// Extra holding the QSC payload in the broadcast.
pub const QSC_EXTRA: &str = "qsc";

/// Funnels the two asynchronous scan sources into `onScanResult` events.
///
/// No ordering is guaranteed between the sources.
pub struct EventRelay {
    publisher: Arc<dyn EventPublisher>,
}

impl EventRelay {
    pub fn new(publisher: Arc<dyn EventPublisher>) -> Self {
        Self { publisher }
    }

    /// Scanner activity finished. Only OK results for the scan request code
    /// that carry a value are relayed.
    pub async fn on_activity_result(
        &self,
        request_code: i32,
        result_ok: bool,
        scan_result: Option<String>,
    ) -> bool {
        if request_code != SCAN_REQUEST_CODE || !result_ok {
            debug!(request_code, result_ok, "Ignoring activity result");
            return false;
        }
        match scan_result {
            Some(value) => self.emit(ScanEvent::scan_result(value)).await,
            None => false,
        }
    }

    /// A system broadcast arrived. Only QSC data broadcasts are relayed.
    pub async fn on_broadcast(&self, action: &str, qsc: Option<String>) -> bool {
        if action != QSC_ACTION {
            debug!(action, "Ignoring broadcast");
            return false;
        }
        match qsc {
            Some(value) => self.emit(ScanEvent::qsc_result(value)).await,
            None => false,
        }
    }

    async fn emit(&self, event: ScanEvent) -> bool {
        let key = event.source.key();
        match self.publisher.publish(event).await {
            Ok(()) => true,
            Err(e) => {
                warn!(key, "Failed to publish scan event: {}", e);
                false
            }
        }
    }
}
