use crate::courier::Command;
use crate::table::HandId;
use serde::Deserialize;
use serde::Serialize;

/// What to do with a hand when it is our turn.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Stay,
    Split,
    Hit,
    DoubleDown,
    NoAction,
}

impl Action {
    /// The outbound command carrying this action, if any.
    pub fn command(&self, hand: HandId) -> Option<Command> {
        match self {
            Action::Stay => Some(Command::Stay(hand)),
            Action::Split => Some(Command::Split(hand)),
            Action::Hit => Some(Command::Hit(hand)),
            Action::DoubleDown => Some(Command::DoubleDown(hand)),
            Action::NoAction => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Action::Stay => write!(f, "STAY"),
            Action::Split => write!(f, "SPLIT"),
            Action::Hit => write!(f, "HIT"),
            Action::DoubleDown => write!(f, "DOUBLE"),
            Action::NoAction => write!(f, "-"),
        }
    }
}
