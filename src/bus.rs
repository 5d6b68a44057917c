//! In-process broadcast of pipeline outcomes. Observers (reporting, the
//! status API) subscribe; the poller never waits on them.

use crate::events::Event;
use tokio::sync::broadcast;
use tracing::trace;

#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }

    pub fn publish(&self, event: Event) -> Result<usize, broadcast::error::SendError<Event>> {
        self.tx.send(event)
    }

    /// Publish, treating "nobody is listening" as fine
    pub fn notify(&self, event: Event) {
        if self.tx.send(event).is_err() {
            trace!("No subscribers for pipeline event");
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
