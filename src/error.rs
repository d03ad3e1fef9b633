use crate::courier::Command;
use crate::gate::GateKind;
use crate::hands::Status;
use crate::session::Phase;
use crate::table::HandId;
use std::time::Duration;
use thiserror::Error;

/// Error type for controller operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("protocol violation: {0}")]
    ProtocolViolation(#[from] Violation),
    #[error("{gate} gate not opened within {after:?}")]
    SynchronizationTimeout { gate: GateKind, after: Duration },
    #[error("{gate} gate already has a waiter")]
    GateMisuse { gate: GateKind },
    #[error("card index {index} out of range for hand of {size}")]
    IndexOutOfRange { index: usize, size: usize },
    #[error("command queue rejected {0}")]
    CommandRejected(Command),
    #[error("invalid card: {0}")]
    InvalidCard(String),
    #[error("invalid hand id: {0}")]
    InvalidHand(String),
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

/// Ways the dealer's event stream can contradict local state.
/// All of them degrade the session; none of them crash delivery.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("unknown hand {0}")]
    UnknownHand(HandId),
    #[error("hand {hand} is {status}")]
    InactiveHand { hand: HandId, status: Status },
    #[error("hand {0} already registered")]
    DuplicateHandId(HandId),
    #[error("split of {original} into {new} leaves no id for the second hand")]
    InvalidSplit { new: HandId, original: HandId },
    #[error("hand {0} already settled")]
    AlreadySettled(HandId),
    #[error("{event} not expected while {phase}")]
    Unexpected { event: &'static str, phase: Phase },
    #[error("{event} ignored, session degraded")]
    Degraded { event: &'static str },
}

/// Result type for controller operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn violation(&self) -> Option<&Violation> {
        match self {
            Error::ProtocolViolation(v) => Some(v),
            _ => None,
        }
    }
}
