use tokio::sync::broadcast;
use tracing::debug;

use super::events::AppEvent;

/// Sink the controller publishes state changes to. Presentation layers
/// implement this or subscribe through [`BroadcastEmitter`].
pub trait EventEmitter: Send + Sync {
    fn emit(&self, event: AppEvent);
}

/// Fan-out emitter backed by a tokio broadcast channel.
#[derive(Clone)]
pub struct BroadcastEmitter {
    sender: broadcast::Sender<AppEvent>,
}

impl BroadcastEmitter {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastEmitter {
    fn default() -> Self {
        Self::new(64)
    }
}

impl EventEmitter for BroadcastEmitter {
    fn emit(&self, event: AppEvent) {
        // No subscribers is not an error; the UI may not be attached yet.
        if self.sender.send(event).is_err() {
            debug!("[Emit] No subscribers for event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_broadcast_reaches_subscriber() {
        let emitter = BroadcastEmitter::default();
        let mut rx = emitter.subscribe();

        emitter.emit(AppEvent::GenerationCountUpdated(7));

        assert_eq!(rx.recv().await.unwrap(), AppEvent::GenerationCountUpdated(7));
    }

    #[test]
    fn test_emit_without_subscribers_is_silent() {
        BroadcastEmitter::default().emit(AppEvent::GenerationCountUpdated(1));
    }
}
