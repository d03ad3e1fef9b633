use super::*;
use crate::cards::*;
use crate::table::HandId;
use serde::Deserialize;
use serde::Serialize;

/// Hard and soft totals exactly as the dealer reported them.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Values {
    pub hard: u8,
    pub soft: u8,
}

impl Values {
    /// The dealer will report a break for this hand.
    pub fn is_broken(&self) -> bool {
        self.hard > crate::BLACKJACK
    }
}

impl From<[u8; 2]> for Values {
    fn from([hard, soft]: [u8; 2]) -> Self {
        Self { hard, soft }
    }
}

impl std::fmt::Display for Values {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.hard, self.soft)
    }
}

/// Ordered cards held by exactly one hand.
/// Grows one card at a time and never shrinks.
/// Not synchronized; the session serializes every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tracker {
    hand: HandId,
    cards: Vec<Card>,
    values: Option<Values>,
    status: Status,
    origin: Origin,
}

impl Tracker {
    /// Empty tracker for a hand listed at the start of a game.
    pub fn dealt(hand: HandId) -> Self {
        Self {
            hand,
            cards: Vec::new(),
            values: None,
            status: Status::Live,
            origin: Origin::Dealt,
        }
    }
    /// Tracker for one half of a split, seeded with the card it inherits.
    pub fn child(hand: HandId, parent: HandId, seed: Option<Card>) -> Self {
        Self {
            hand,
            cards: seed.into_iter().collect(),
            values: None,
            status: Status::Live,
            origin: Origin::Split { parent },
        }
    }
    pub fn id(&self) -> HandId {
        self.hand
    }
    pub fn hit(&mut self, card: Card) {
        self.cards.push(card);
    }
    pub fn report(&mut self, values: Values) {
        self.values = Some(values);
    }
    pub fn size(&self) -> usize {
        self.cards.len()
    }
    pub fn card_at(&self, index: usize) -> crate::Result<Card> {
        self.cards
            .get(index)
            .copied()
            .ok_or(crate::Error::IndexOutOfRange {
                index,
                size: self.size(),
            })
    }
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
    /// Last totals the dealer attached to a deal, if any.
    pub fn values(&self) -> Option<Values> {
        self.values
    }
    pub fn status(&self) -> Status {
        self.status
    }
    pub fn origin(&self) -> Origin {
        self.origin
    }
    /// Not the product of a split.
    pub fn is_original(&self) -> bool {
        matches!(self.origin, Origin::Dealt)
    }
    pub fn is_live(&self) -> bool {
        self.status == Status::Live
    }
    /// Exactly two cards of the same rank.
    pub fn is_pair(&self) -> bool {
        match self.cards.as_slice() {
            [a, b] => a.rank() == b.rank(),
            _ => false,
        }
    }
    pub(crate) fn mark(&mut self, status: Status) {
        self.status = status;
    }
}

impl std::fmt::Display for Tracker {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let cards = self
            .cards
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{} [{}] {}", self.hand, cards, self.status)
    }
}
