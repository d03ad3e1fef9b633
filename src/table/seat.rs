use serde::Deserialize;
use serde::Serialize;

/// Participant role at the table.
/// The local player is always `You`; everyone else is an opponent
/// from the ledger's point of view.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Seat {
    You,
    Dealer,
    Right,
    Left,
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Seat::You => "YOU",
                Seat::Dealer => "DEALER",
                Seat::Right => "RIGHT",
                Seat::Left => "LEFT",
            }
        )
    }
}

impl TryFrom<&str> for Seat {
    type Error = crate::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_ascii_uppercase().as_str() {
            "YOU" => Ok(Seat::You),
            "DEALER" => Ok(Seat::Dealer),
            "RIGHT" => Ok(Seat::Right),
            "LEFT" => Ok(Seat::Left),
            _ => Err(crate::Error::InvalidHand(s.to_string())),
        }
    }
}
