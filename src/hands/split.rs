use super::*;
use crate::Violation;
use crate::table::HandId;

/// Seeds the two children of a split from their parent.
///
/// Each child inherits one of the parent's cards, first to `a` and second to `b`,
/// and waits for the dealer to deal its next one. No cards are invented here.
pub struct SplitHandler;

impl SplitHandler {
    pub fn split(
        registry: &Registry,
        parent: HandId,
        a: HandId,
        b: HandId,
        hand: &Tracker,
    ) -> crate::Result<(Tracker, Tracker)> {
        for child in [a, b] {
            if registry.contains(&child) || child == parent {
                return Err(Violation::DuplicateHandId(child).into());
            }
        }
        if a == b {
            return Err(Violation::DuplicateHandId(b).into());
        }
        Ok((
            Tracker::child(a, parent, hand.card_at(0).ok()),
            Tracker::child(b, parent, hand.card_at(1).ok()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::*;
    use crate::table::Seat;

    fn nines() -> (Registry, HandId) {
        let parent = HandId::new(Seat::You, 1);
        let mut registry = Registry::default();
        registry
            .replace(&[parent, HandId::new(Seat::Dealer, 1)])
            .unwrap();
        registry
            .deal(parent, Card::new(Rank::Nine, Suit::Club), None)
            .unwrap();
        registry
            .deal(parent, Card::new(Rank::Nine, Suit::Diamond), None)
            .unwrap();
        (registry, parent)
    }

    #[test]
    fn children_inherit_one_card_each() {
        let (registry, parent) = nines();
        let hand = registry.get(&parent).unwrap();
        let (a, b) = SplitHandler::split(
            &registry,
            parent,
            HandId::new(Seat::You, 2),
            HandId::new(Seat::You, 3),
            hand,
        )
        .unwrap();
        assert_eq!(a.cards(), &[Card::new(Rank::Nine, Suit::Club)]);
        assert_eq!(b.cards(), &[Card::new(Rank::Nine, Suit::Diamond)]);
    }

    #[test]
    fn existing_child_is_a_duplicate() {
        let (registry, parent) = nines();
        let hand = registry.get(&parent).unwrap();
        let dealer = HandId::new(Seat::Dealer, 1);
        let result = SplitHandler::split(&registry, parent, HandId::new(Seat::You, 2), dealer, hand);
        assert!(matches!(
            result.unwrap_err().violation(),
            Some(Violation::DuplicateHandId(h)) if *h == dealer
        ));
    }
}
