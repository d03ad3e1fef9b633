use super::*;
use crate::Violation;
use crate::cards::Card;
use crate::table::HandId;
use crate::table::Seat;
use std::collections::BTreeMap;
use std::collections::HashMap;

/// Every hand the dealer has told us about in the current game.
///
/// Entries appear when a game starts or a hand splits, and are retired
/// when the game ends. The next game's start replaces them wholesale.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    hands: HashMap<HandId, Tracker>,
}

impl Registry {
    /// Drops the previous game and registers the hands of the next one.
    pub fn replace(&mut self, hands: &[HandId]) -> crate::Result<()> {
        let mut next = HashMap::with_capacity(hands.len());
        for &hand in hands {
            if next.insert(hand, Tracker::dealt(hand)).is_some() {
                return Err(Violation::DuplicateHandId(hand).into());
            }
        }
        self.hands = next;
        Ok(())
    }
    pub fn clear(&mut self) {
        self.hands.clear();
    }
    pub fn contains(&self, hand: &HandId) -> bool {
        self.hands.contains_key(hand)
    }
    pub fn get(&self, hand: &HandId) -> crate::Result<&Tracker> {
        self.hands
            .get(hand)
            .ok_or_else(|| Violation::UnknownHand(*hand).into())
    }
    /// Registered and still taking cards and turns.
    pub fn live(&self, hand: &HandId) -> crate::Result<&Tracker> {
        self.get(hand).and_then(|t| match t.status() {
            Status::Live => Ok(t),
            status => Err(Violation::InactiveHand {
                hand: *hand,
                status,
            }
            .into()),
        })
    }
    fn live_mut(&mut self, hand: &HandId) -> crate::Result<&mut Tracker> {
        self.live(hand)?;
        self.hands
            .get_mut(hand)
            .ok_or_else(|| Violation::UnknownHand(*hand).into())
    }
    /// Appends a dealt card, returning the new hand size.
    pub fn deal(&mut self, hand: HandId, card: Card, values: Option<Values>) -> crate::Result<usize> {
        let tracker = self.live_mut(&hand)?;
        tracker.hit(card);
        if let Some(values) = values {
            tracker.report(values);
        }
        Ok(tracker.size())
    }
    /// Retires `original` and registers its two children, `new` and its sibling.
    pub fn split(&mut self, new: HandId, original: HandId) -> crate::Result<(HandId, HandId)> {
        let b = new.sibling().ok_or(Violation::InvalidSplit { new, original })?;
        let a = new;
        let parent = self.live(&original)?;
        let (left, right) = SplitHandler::split(self, original, a, b, parent)?;
        self.live_mut(&original)?.mark(Status::Split);
        self.hands.insert(a, left);
        self.hands.insert(b, right);
        Ok((a, b))
    }
    /// Bust or Charlie: the hand stops playing but is not yet paid.
    pub fn close(&mut self, hand: HandId, status: Status) -> crate::Result<()> {
        self.live_mut(&hand)?.mark(status);
        Ok(())
    }
    /// Win, lose, push or blackjack: at most once per hand.
    pub fn settle(&mut self, hand: HandId) -> crate::Result<()> {
        let tracker = self
            .hands
            .get_mut(&hand)
            .ok_or(Violation::UnknownHand(hand))?;
        match tracker.status() {
            status if status.is_settleable() => {
                tracker.mark(Status::Settled);
                Ok(())
            }
            Status::Settled => Err(Violation::AlreadySettled(hand).into()),
            status => Err(Violation::InactiveHand { hand, status }.into()),
        }
    }
    /// End of game: nothing here may be referenced again.
    pub fn retire(&mut self) {
        self.hands
            .values_mut()
            .filter(|t| t.status() != Status::Split)
            .for_each(|t| t.mark(Status::Retired));
    }
    /// Hands produced by splitting `parent`, in key order.
    pub fn children(&self, parent: &HandId) -> Vec<HandId> {
        let mut children = self
            .hands
            .values()
            .filter(|t| t.origin() == Origin::Split { parent: *parent })
            .map(Tracker::id)
            .collect::<Vec<_>>();
        children.sort();
        children
    }
    /// Every hand produced by a split in this seat, in key order.
    pub fn splits(&self, seat: Seat) -> Vec<HandId> {
        let mut splits = self
            .hands
            .values()
            .filter(|t| t.id().seat() == seat && !t.is_original())
            .map(Tracker::id)
            .collect::<Vec<_>>();
        splits.sort();
        splits
    }
    /// Hands still in play, in key order.
    pub fn active(&self) -> Vec<HandId> {
        let mut active = self
            .hands
            .values()
            .filter(|t| t.is_live())
            .map(Tracker::id)
            .collect::<Vec<_>>();
        active.sort();
        active
    }
    /// Ordered view of every registered hand and its cards.
    pub fn snapshot(&self) -> BTreeMap<HandId, Vec<Card>> {
        self.hands
            .iter()
            .map(|(hid, t)| (*hid, t.cards().to_vec()))
            .collect()
    }
}
