use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use domain::scan::{LaunchError, ScanRequest, ScannerLauncher};
use tracing::info;

/// Scanner activity launcher for hosts without a real activity stack.
///
/// Launches are recorded; an unavailable launcher fails every launch the way
/// a missing scanner app does.
pub struct RecordingLauncher {
    available: AtomicBool,
    launches: Mutex<Vec<ScanRequest>>,
}

impl RecordingLauncher {
    pub fn new(available: bool) -> Self {
        Self {
            available: AtomicBool::new(available),
            launches: Mutex::new(Vec::new()),
        }
    }

    fn launches_guard(&self) -> MutexGuard<'_, Vec<ScanRequest>> {
        self.launches.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn launches(&self) -> Vec<ScanRequest> {
        self.launches_guard().clone()
    }
}

impl Default for RecordingLauncher {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ScannerLauncher for RecordingLauncher {
    fn launch(&self, request: &ScanRequest) -> Result<(), LaunchError> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(LaunchError(format!(
                "no activity found for {}/{}",
                request.package, request.activity
            )));
        }
        info!(activity = request.activity, "📷 Scanner activity launched");
        self.launches_guard().push(request.clone());
        Ok(())
    }
}
