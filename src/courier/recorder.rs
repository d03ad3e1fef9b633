use super::*;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;

/// Courier that hands every command to a channel instead of a dealer.
#[derive(Debug, Clone)]
pub struct Recorder {
    tx: UnboundedSender<Command>,
}

impl Recorder {
    /// Creates the courier together with the receiving end of its channel.
    pub fn pair() -> (Self, UnboundedReceiver<Command>) {
        let (tx, rx) = unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait::async_trait]
impl Courier for Recorder {
    async fn send(&self, command: Command) -> anyhow::Result<()> {
        log::debug!("[recorder] {}", command);
        self.tx
            .send(command)
            .map_err(|_| anyhow::anyhow!("recorder closed before {}", command))
    }
}
