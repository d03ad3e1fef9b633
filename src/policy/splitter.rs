use super::*;
use crate::cards::Rank;
use crate::hands::Tracker;
use crate::table::HandId;

/// Splits an opening pair of nines, stays on everything else.
/// Children of a split are never split again.
#[derive(Debug, Clone, Copy)]
pub struct Splitter {
    rank: Rank,
}

impl Splitter {
    pub fn new(rank: Rank) -> Self {
        Self { rank }
    }
}

impl Default for Splitter {
    fn default() -> Self {
        Self::new(Rank::Nine)
    }
}

impl Policy for Splitter {
    fn decide(&self, _: HandId, tracker: &Tracker) -> Action {
        let opening = tracker.is_original() && tracker.is_pair();
        match tracker.cards().first() {
            Some(card) if opening && card.rank() == self.rank => Action::Split,
            _ => Action::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::*;
    use crate::table::Seat;

    const YOU: HandId = HandId::new(Seat::You, 1);

    fn hand(ranks: &[Rank]) -> Tracker {
        let mut tracker = Tracker::dealt(YOU);
        ranks
            .iter()
            .zip(Suit::all().into_iter().cycle())
            .for_each(|(&r, s)| tracker.hit(Card::new(r, s)));
        tracker
    }

    #[test]
    fn splits_opening_nines() {
        let tracker = hand(&[Rank::Nine, Rank::Nine]);
        assert_eq!(Splitter::default().decide(YOU, &tracker), Action::Split);
    }

    #[test]
    fn stays_on_other_pairs() {
        let tracker = hand(&[Rank::Eight, Rank::Eight]);
        assert_eq!(Splitter::default().decide(YOU, &tracker), Action::Stay);
    }

    #[test]
    fn stays_on_three_nines() {
        let tracker = hand(&[Rank::Nine, Rank::Nine, Rank::Nine]);
        assert_eq!(Splitter::default().decide(YOU, &tracker), Action::Stay);
    }

    #[test]
    fn never_resplits() {
        let child = HandId::new(Seat::You, 2);
        let mut tracker = Tracker::child(child, YOU, Some(Card::new(Rank::Nine, Suit::Club)));
        tracker.hit(Card::new(Rank::Nine, Suit::Heart));
        assert_eq!(Splitter::default().decide(child, &tracker), Action::Stay);
    }

    #[test]
    fn closures_are_policies() {
        let hitter = |_: HandId, _: &Tracker| Action::Hit;
        assert_eq!(hitter.decide(YOU, &hand(&[Rank::Two])), Action::Hit);
    }
}
