use crate::courier::Command;
use crate::courier::Courier;
use crate::session::Event;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;

/// What the dealer says after it receives one expected command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Act {
    pub on: Command,
    pub events: Vec<Event>,
}

impl Act {
    pub fn new(on: Command, events: Vec<Event>) -> Self {
        Self { on, events }
    }
}

/// Courier backed by a fixed script instead of a network dealer.
///
/// Every command must match the next act; its events are then pushed onto
/// the event channel in order, as a real dealer would stream them back.
/// Clones share the same script and channel.
#[derive(Debug, Clone)]
pub struct Scripted {
    acts: Arc<Mutex<VecDeque<Act>>>,
    events: UnboundedSender<Event>,
}

impl Scripted {
    pub fn new(acts: Vec<Act>) -> (Self, UnboundedReceiver<Event>) {
        let (tx, rx) = unbounded_channel();
        let acts = Arc::new(Mutex::new(VecDeque::from(acts)));
        (Self { acts, events: tx }, rx)
    }
    /// We sat down; the dealer answers READY.
    pub fn arrive(&self) -> anyhow::Result<()> {
        self.emit(vec![Event::Ready])
    }
    /// Acts not yet played.
    pub fn remaining(&self) -> usize {
        self.acts.lock().map(|acts| acts.len()).unwrap_or_default()
    }
    fn next(&self, command: Command) -> anyhow::Result<Act> {
        let mut acts = self
            .acts
            .lock()
            .map_err(|_| anyhow::anyhow!("script poisoned"))?;
        match acts.front().map(|act| act.on) {
            None => Err(anyhow::anyhow!("dealer has nothing scripted for {}", command)),
            Some(expected) if expected != command => Err(anyhow::anyhow!(
                "dealer expected {} but got {}",
                expected,
                command
            )),
            Some(_) => acts
                .pop_front()
                .ok_or_else(|| anyhow::anyhow!("script emptied")),
        }
    }
    fn emit(&self, events: Vec<Event>) -> anyhow::Result<()> {
        events.into_iter().try_for_each(|event| {
            log::debug!("[dealer] {}", event);
            self.events
                .send(event)
                .map_err(|_| anyhow::anyhow!("table left"))
        })
    }
}

#[async_trait::async_trait]
impl Courier for Scripted {
    async fn send(&self, command: Command) -> anyhow::Result<()> {
        log::debug!("[dealer] received {}", command);
        let act = self.next(command)?;
        self.emit(act.events)
    }
}
