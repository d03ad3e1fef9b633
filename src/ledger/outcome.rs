use serde::Deserialize;
use serde::Serialize;

/// How a hand was paid out by the dealer.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
    Push,
    Blackjack,
}

impl Outcome {
    /// Direction of the money for the hand's owner.
    pub fn sign(&self) -> i64 {
        match self {
            Outcome::Win | Outcome::Blackjack => 1,
            Outcome::Lose => -1,
            Outcome::Push => 0,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Outcome::Win => "WIN",
                Outcome::Lose => "LOSE",
                Outcome::Push => "PUSH",
                Outcome::Blackjack => "BLACKJACK",
            }
        )
    }
}
