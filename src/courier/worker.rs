use super::*;
use crate::Error;
use std::sync::Arc;
use tokio::sync::mpsc::Receiver;
use tokio::sync::mpsc::Sender;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::channel;
use tokio::sync::mpsc::unbounded_channel;

/// A command the courier refused, with the courier's own error.
#[derive(Debug)]
pub struct Failure {
    pub command: Command,
    pub error: anyhow::Error,
}

/// Handle to a task that drains a bounded command queue into a courier.
///
/// - Dispatch submits without awaiting, so event delivery never blocks
/// - The task sends commands one at a time, in submission order
/// - Courier errors and refused submissions are logged and reported on
///   the failure channel
/// - Dropping the handle closes the queue and ends the task
pub struct Worker {
    queue: Sender<Command>,
    failures: UnboundedSender<Failure>,
}

impl Worker {
    pub fn spawn(courier: Arc<dyn Courier>, backlog: usize) -> (Self, UnboundedReceiver<Failure>) {
        let (tx, rx) = channel(backlog.max(1));
        let (failures, reports) = unbounded_channel();
        tokio::spawn(Self::run(courier, rx, failures.clone()));
        (Self { queue: tx, failures }, reports)
    }
    /// Queues a command, refusing rather than waiting when the queue is full.
    pub fn submit(&self, command: Command) -> crate::Result<()> {
        match self.queue.try_send(command) {
            Ok(()) => {
                log::debug!("[worker] queued {}", command);
                Ok(())
            }
            Err(e) => {
                let command = e.into_inner();
                log::error!("[worker] queue refused {}", command);
                let error = anyhow::Error::new(Error::CommandRejected(command));
                let _ = self.failures.send(Failure { command, error });
                Err(Error::CommandRejected(command))
            }
        }
    }
    async fn run(
        courier: Arc<dyn Courier>,
        mut queue: Receiver<Command>,
        failures: UnboundedSender<Failure>,
    ) {
        while let Some(command) = queue.recv().await {
            log::debug!("[worker] sending {}", command);
            if let Err(error) = courier.send(command).await {
                log::error!("[worker] {} failed: {:#}", command, error);
                let _ = failures.send(Failure { command, error });
            }
        }
        log::debug!("[worker] queue closed");
    }
}
