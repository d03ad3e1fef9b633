use crate::Chips;
use crate::Shoe;
use crate::cards::Card;
use crate::hands::Values;
use crate::ledger::Outcome;
use crate::table::HandId;
use serde::Deserialize;
use serde::Serialize;

/// Everything the dealer can tell us, one variant per protocol message.
/// Delivered to the controller strictly in the order received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Dealer acknowledged our arrival and will accept bets.
    Ready,
    /// New game with these hands; the shoe has this many cards left.
    Starting { hands: Vec<HandId>, shoe: Shoe },
    /// A card for a hand, with the dealer's hard and soft totals.
    Deal {
        hand: HandId,
        card: Card,
        values: Values,
    },
    /// The dealer wants a decision on this hand. Sent once per hand.
    Turn { hand: HandId },
    /// Hand broke; settled by a later lose.
    Bust { hand: HandId },
    Win { hand: HandId, amount: Chips },
    Lose { hand: HandId, amount: Chips },
    Push { hand: HandId },
    Blackjack { hand: HandId, amount: Chips },
    /// Five cards without breaking; settled by a later win.
    Charlie { hand: HandId },
    /// `original` split; `new` and its sibling replace it.
    Split { new: HandId, original: HandId },
    /// Game over; the shoe has this many cards left.
    Ending { shoe: Shoe },
    /// Burn card reached, the shoe will be reshuffled.
    Shuffling,
}

impl Event {
    pub fn deal(hand: HandId, card: Card, values: [u8; 2]) -> Self {
        Event::Deal {
            hand,
            card,
            values: Values::from(values),
        }
    }
    /// Short name for logs and violations.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Ready => "ready",
            Event::Starting { .. } => "starting",
            Event::Deal { .. } => "deal",
            Event::Turn { .. } => "turn",
            Event::Bust { .. } => "bust",
            Event::Win { .. } => "win",
            Event::Lose { .. } => "lose",
            Event::Push { .. } => "push",
            Event::Blackjack { .. } => "blackjack",
            Event::Charlie { .. } => "charlie",
            Event::Split { .. } => "split",
            Event::Ending { .. } => "ending",
            Event::Shuffling => "shuffling",
        }
    }
    /// The single hand this event is about, if it is about one.
    pub fn hand(&self) -> Option<HandId> {
        match self {
            Event::Deal { hand, .. }
            | Event::Turn { hand }
            | Event::Bust { hand }
            | Event::Win { hand, .. }
            | Event::Lose { hand, .. }
            | Event::Push { hand }
            | Event::Blackjack { hand, .. }
            | Event::Charlie { hand } => Some(*hand),
            Event::Split { original, .. } => Some(*original),
            Event::Ready | Event::Starting { .. } | Event::Ending { .. } | Event::Shuffling => None,
        }
    }
    /// Settling events move money exactly once per hand.
    pub fn settlement(&self) -> Option<(HandId, Outcome, Chips)> {
        match self {
            Event::Win { hand, amount } => Some((*hand, Outcome::Win, *amount)),
            Event::Lose { hand, amount } => Some((*hand, Outcome::Lose, *amount)),
            Event::Push { hand } => Some((*hand, Outcome::Push, 0)),
            Event::Blackjack { hand, amount } => Some((*hand, Outcome::Blackjack, *amount)),
            _ => None,
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Event::Ready => write!(f, "READY"),
            Event::Starting { hands, shoe } => write!(
                f,
                "game STARTING: {} shoe size: {}",
                hands
                    .iter()
                    .map(|h| h.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
                shoe
            ),
            Event::Deal { hand, card, values } => write!(
                f,
                "DEAL: {} card: {} hand values: {}, {}",
                hand, card, values.hard, values.soft
            ),
            Event::Turn { hand } => write!(f, "TURN: {}", hand),
            Event::Bust { hand } => write!(f, "BREAK: {}", hand),
            Event::Win { hand, amount } => write!(f, "WIN: {} {}", hand, amount),
            Event::Lose { hand, amount } => write!(f, "LOSE: {} {}", hand, amount),
            Event::Push { hand } => write!(f, "PUSH: {}", hand),
            Event::Blackjack { hand, amount } => write!(f, "BLACKJACK: {} {}", hand, amount),
            Event::Charlie { hand } => write!(f, "CHARLIE: {}", hand),
            Event::Split { new, original } => {
                write!(f, "SPLIT: new hand {} from {}", new, original)
            }
            Event::Ending { shoe } => write!(f, "ENDING game shoe size: {}", shoe),
            Event::Shuffling => write!(f, "SHUFFLING"),
        }
    }
}
