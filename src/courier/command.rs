use crate::Chips;
use crate::table::HandId;
use serde::Deserialize;
use serde::Serialize;

/// Requests we send to the dealer.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    PlaceBet { amount: Chips, side: Chips },
    Stay(HandId),
    Split(HandId),
    Hit(HandId),
    DoubleDown(HandId),
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Command::PlaceBet { amount, side } => write!(f, "BET {} side {}", amount, side),
            Command::Stay(h) => write!(f, "STAY {}", h),
            Command::Split(h) => write!(f, "SPLIT {}", h),
            Command::Hit(h) => write!(f, "HIT {}", h),
            Command::DoubleDown(h) => write!(f, "DOUBLE {}", h),
        }
    }
}
