use crate::event::ScanEvent;
use async_trait::async_trait;

/// Outbound sink for scan events (the scripting layer's event emitter)
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(
        &self,
        event: ScanEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
