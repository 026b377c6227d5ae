use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Request code used when launching the scanner activity.
pub const SCAN_REQUEST_CODE: i32 = 0x1000;

pub const SCANNER_PACKAGE: &str = "net.nyx.scanner";
pub const SCANNER_ACTIVITY: &str = "net.nyx.scanner.ScannerActivity";

/// Caller supplied scanner options, consumed once per scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanOptions {
    /// Action bar title of the capture page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Whether to display the album button (scanner default: true)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_album: Option<bool>,
    /// Beep when a result is captured (scanner default: true)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_sound: Option<bool>,
    /// Vibrate when a result is captured (scanner default: true)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_vibrate: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanExtra {
    Text(String),
    Flag(bool),
}

/// Fully resolved launch request for the scanner activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    pub package: &'static str,
    pub activity: &'static str,
    pub request_code: i32,
    /// Only the options the caller set, in a stable order.
    pub extras: Vec<(&'static str, ScanExtra)>,
}

impl ScanRequest {
    pub fn new(options: &ScanOptions) -> Self {
        let mut extras = Vec::new();
        if let Some(title) = &options.title {
            extras.push(("TITLE", ScanExtra::Text(title.clone())));
        }
        if let Some(show) = options.show_album {
            extras.push(("SHOW_ALBUM", ScanExtra::Flag(show)));
        }
        if let Some(sound) = options.play_sound {
            extras.push(("PLAY_SOUND", ScanExtra::Flag(sound)));
        }
        if let Some(vibrate) = options.play_vibrate {
            extras.push(("PLAY_VIBRATE", ScanExtra::Flag(vibrate)));
        }

        Self {
            package: SCANNER_PACKAGE,
            activity: SCANNER_ACTIVITY,
            request_code: SCAN_REQUEST_CODE,
            extras,
        }
    }
}

#[derive(Debug, Error)]
#[error("Scanner launch failed: {0}")]
pub struct LaunchError(pub String);

/// Starts the platform scanner activity. The result arrives later through
/// the event relay.
pub trait ScannerLauncher: Send + Sync {
    fn launch(&self, request: &ScanRequest) -> Result<(), LaunchError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_options_produce_no_extras() {
        let request = ScanRequest::new(&ScanOptions::default());
        assert!(request.extras.is_empty());
        assert_eq!(request.request_code, 0x1000);
        assert_eq!(request.activity, "net.nyx.scanner.ScannerActivity");
    }

    #[test]
    fn test_only_present_options_become_extras() {
        let options: ScanOptions = serde_json::from_value(json!({
            "title": "Scan ticket",
            "playSound": false
        }))
        .unwrap();

        let request = ScanRequest::new(&options);
        assert_eq!(
            request.extras,
            vec![
                ("TITLE", ScanExtra::Text("Scan ticket".into())),
                ("PLAY_SOUND", ScanExtra::Flag(false)),
            ]
        );
    }
}
