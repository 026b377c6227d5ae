use async_trait::async_trait;
use domain::event::{EventPublisher, ScanEvent};
use tokio::sync::broadcast;
use tracing::debug;

/// Fans scan events out to every listener of the scripting layer.
///
/// Events emitted while nobody listens are dropped and reported as an error,
/// matching an event emitter with no attached context.
#[derive(Clone)]
pub struct ChannelEventPublisher {
    sender: broadcast::Sender<ScanEvent>,
}

impl ChannelEventPublisher {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ScanEvent> {
        self.sender.subscribe()
    }

    pub fn listener_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChannelEventPublisher {
    fn default() -> Self {
        Self::new(64)
    }
}

#[async_trait]
impl EventPublisher for ChannelEventPublisher {
    async fn publish(
        &self,
        event: ScanEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let listeners = self.sender.send(event)?;
        debug!(listeners, "Scan event delivered");
        Ok(())
    }
}
