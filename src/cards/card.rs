use super::rank::Rank;
use super::suit::Suit;
use serde::Deserialize;
use serde::Serialize;
use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

/// A single playing card as reported by the dealer.
/// Opaque beyond equality and display: hand values are the dealer's business.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
    pub fn rank(&self) -> Rank {
        self.rank
    }
    pub fn suit(&self) -> Suit {
        self.suit
    }
}

impl From<(Rank, Suit)> for Card {
    fn from((rank, suit): (Rank, Suit)) -> Self {
        Self::new(rank, suit)
    }
}

/// str isomorphism
/// rank then suit, e.g. "9c", "Td", "10d", "As"
impl FromStr for Card {
    type Err = crate::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let suit = s
            .chars()
            .last()
            .ok_or_else(|| crate::Error::InvalidCard(s.to_string()))?;
        let rank = &s[..s.len() - suit.len_utf8()];
        Ok(Self {
            rank: Rank::try_from(rank)?,
            suit: Suit::try_from(suit)?,
        })
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}
