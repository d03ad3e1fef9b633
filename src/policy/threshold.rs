use super::*;
use crate::hands::Tracker;
use crate::table::HandId;

/// Hits while the dealer-reported hard total is under a threshold.
/// Without any reported totals there is nothing to go on, so it stays.
#[derive(Debug, Clone, Copy)]
pub struct Threshold(u8);

impl Threshold {
    pub fn new(below: u8) -> Self {
        Self(below)
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::new(crate::HIT_THRESHOLD)
    }
}

impl Policy for Threshold {
    fn decide(&self, _: HandId, tracker: &Tracker) -> Action {
        match tracker.values() {
            Some(values) if values.hard < self.0 => Action::Hit,
            _ => Action::Stay,
        }
    }
}
