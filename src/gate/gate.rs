use super::*;
use crate::Error;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::time::Duration;
use tokio::sync::Notify;

#[derive(Debug, Default)]
struct Slot {
    open: bool,
    waiting: bool,
}

/// Single-waiter rendezvous between the event stream and a driving task.
///
/// Level-triggered: an `open` with nobody waiting is remembered, so the
/// next `wait` returns at once. `wait` closes the gate again on its way out.
/// A second concurrent waiter is a bug in the caller and fails immediately.
#[derive(Debug)]
pub struct Gate {
    kind: GateKind,
    slot: Mutex<Slot>,
    notify: Notify,
}

impl Gate {
    pub fn new(kind: GateKind) -> Self {
        Self {
            kind,
            slot: Mutex::new(Slot::default()),
            notify: Notify::new(),
        }
    }
    pub fn kind(&self) -> GateKind {
        self.kind
    }
    /// Idempotent; never lost.
    pub fn open(&self) {
        self.slot().open = true;
        self.notify.notify_one();
        log::trace!("[gate {}] opened", self.kind);
    }
    /// Forget a pending open without waiting for it.
    pub fn close(&self) {
        self.slot().open = false;
    }
    pub fn is_open(&self) -> bool {
        self.slot().open
    }
    /// Suspends until the gate is open, then closes it.
    /// Gives up with `SynchronizationTimeout` once `deadline` elapses.
    pub async fn wait(&self, deadline: Duration) -> crate::Result<()> {
        let _waiter = self.enter()?;
        log::debug!("[gate {}] waiting up to {:?}", self.kind, deadline);
        tokio::time::timeout(deadline, self.pass())
            .await
            .map_err(|_| Error::SynchronizationTimeout {
                gate: self.kind,
                after: deadline,
            })
            .inspect(|_| log::debug!("[gate {}] passed", self.kind))
            .inspect_err(|e| log::warn!("[gate {}] {}", self.kind, e))
    }
}

impl Gate {
    async fn pass(&self) {
        loop {
            let notified = self.notify.notified();
            if self.take() {
                return;
            }
            notified.await;
        }
    }
    fn take(&self) -> bool {
        std::mem::take(&mut self.slot().open)
    }
    fn enter(&self) -> crate::Result<Waiter<'_>> {
        let mut slot = self.slot();
        if slot.waiting {
            return Err(Error::GateMisuse { gate: self.kind });
        }
        slot.waiting = true;
        Ok(Waiter(self))
    }
    fn slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Holds the single waiter slot; released even if the wait is cancelled.
struct Waiter<'g>(&'g Gate);

impl Drop for Waiter<'_> {
    fn drop(&mut self) {
        self.0.slot().waiting = false;
    }
}
