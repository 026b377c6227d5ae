use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

mod publisher;
pub use publisher::EventPublisher;

/// Name of the outbound event delivered to the scripting layer.
pub const EVENT_NAME: &str = "onScanResult";

/// Which asynchronous source produced a scan result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScanSource {
    /// Scanner activity completed
    #[serde(rename = "SCAN_RESULT")]
    ScanResult,
    /// Infrared / QSC broadcast
    #[serde(rename = "QSC_RESULT")]
    QscResult,
}

impl ScanSource {
    /// Key of the single-entry payload record.
    pub fn key(&self) -> &'static str {
        match self {
            Self::ScanResult => "SCAN_RESULT",
            Self::QscResult => "QSC_RESULT",
        }
    }
}

/// A scan result ready to be emitted as `onScanResult`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanEvent {
    pub source: ScanSource,
    pub value: String,
    pub received_at: DateTime<Utc>,
}

impl ScanEvent {
    /// Create an event for a scanner activity result
    pub fn scan_result(value: impl Into<String>) -> Self {
        Self::new(ScanSource::ScanResult, value)
    }

    /// Create an event for a QSC broadcast
    pub fn qsc_result(value: impl Into<String>) -> Self {
        Self::new(ScanSource::QscResult, value)
    }

    fn new(source: ScanSource, value: impl Into<String>) -> Self {
        Self {
            source,
            value: value.into(),
            received_at: Utc::now(),
        }
    }

    pub fn event_name(&self) -> &'static str {
        EVENT_NAME
    }

    /// Payload as seen by the scripting layer: `{ "<KEY>": value }`.
    pub fn payload(&self) -> Value {
        let mut map = Map::new();
        map.insert(self.source.key().to_string(), Value::String(self.value.clone()));
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scan_result_payload() {
        let event = ScanEvent::scan_result("6901234567892");
        assert_eq!(event.event_name(), "onScanResult");
        assert_eq!(event.payload(), json!({ "SCAN_RESULT": "6901234567892" }));
    }

    #[test]
    fn test_qsc_result_payload() {
        let event = ScanEvent::qsc_result("QSC-42");
        assert_eq!(event.source, ScanSource::QscResult);
        assert_eq!(event.payload(), json!({ "QSC_RESULT": "QSC-42" }));
    }

    #[test]
    fn test_event_serialization() {
        let event = ScanEvent::qsc_result("abc");
        let json_str = serde_json::to_string(&event).unwrap();
        assert!(json_str.contains("\"QSC_RESULT\""));

        let deserialized: ScanEvent = serde_json::from_str(&json_str).unwrap();
        assert_eq!(deserialized, event);
    }
}
