use crate::session::Event;
use crate::session::SessionController;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

/// Transport side of a session: feeds every event to the controller in
/// arrival order until the channel closes. Rejected events are logged and
/// counted, never fatal to delivery.
pub async fn deliver(session: Arc<SessionController>, mut events: UnboundedReceiver<Event>) -> usize {
    let mut rejected = 0;
    while let Some(event) = events.recv().await {
        if let Err(e) = session.dispatch(event) {
            log::warn!("[transport] event rejected: {}", e);
            rejected += 1;
        }
    }
    log::debug!("[transport] closed with {} rejected events", rejected);
    rejected
}
