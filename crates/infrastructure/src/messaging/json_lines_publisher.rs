use std::io::Write;
use std::sync::Mutex;

use async_trait::async_trait;
use domain::event::{EventPublisher, ScanEvent};
use serde_json::json;

/// Writes each scan event as one JSON line: `{"event": ..., "payload": ...}`.
pub struct JsonLinesPublisher<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> JsonLinesPublisher<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl<W: Write + Send> EventPublisher for JsonLinesPublisher<W> {
    async fn publish(
        &self,
        event: ScanEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let line = json!({
            "event": event.event_name(),
            "payload": event.payload(),
        });
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        serde_json::to_writer(&mut *out, &line)?;
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(())
    }
}
