use super::*;
use crate::hands::Tracker;
use crate::table::HandId;

/// Trait for anything that picks an action for a hand on its turn.
///
/// Called synchronously from event dispatch, so implementations must be
/// cheap and free of I/O. Given the same visible cards a policy must
/// always return the same action; replaying an event stream depends on it.
pub trait Policy: Send + Sync {
    fn decide(&self, hand: HandId, tracker: &Tracker) -> Action;
}

impl<F> Policy for F
where
    F: Fn(HandId, &Tracker) -> Action + Send + Sync,
{
    fn decide(&self, hand: HandId, tracker: &Tracker) -> Action {
        self(hand, tracker)
    }
}
