use super::Seat;
use serde::Deserialize;
use serde::Serialize;
use std::str::FromStr;

/// Identifier of one hand at the table, issued by the dealer.
/// A seat can hold several hands at once after a split,
/// so the key disambiguates between them.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HandId {
    seat: Seat,
    key: u64,
}

impl HandId {
    pub const fn new(seat: Seat, key: u64) -> Self {
        Self { seat, key }
    }
    pub fn seat(&self) -> Seat {
        self.seat
    }
    pub fn key(&self) -> u64 {
        self.key
    }
    /// The second child of a split: next key, same seat.
    ///
    /// The dealer names only the first child of a split and numbers the
    /// second one consecutively after it; this is the one id derived here
    /// rather than read off the wire. `None` when the key has no successor.
    pub fn sibling(&self) -> Option<Self> {
        self.key.checked_add(1).map(|key| Self {
            seat: self.seat,
            key,
        })
    }
}

/// "YOU#1", "DEALER#1"
impl FromStr for HandId {
    type Err = crate::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (seat, key) = s
            .split_once('#')
            .ok_or_else(|| crate::Error::InvalidHand(s.to_string()))?;
        Ok(Self {
            seat: Seat::try_from(seat)?,
            key: key
                .parse()
                .map_err(|_| crate::Error::InvalidHand(s.to_string()))?,
        })
    }
}

impl std::fmt::Display for HandId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}#{}", self.seat, self.key)
    }
}
