use super::*;
use crate::hands::Tracker;
use crate::table::HandId;

/// Stays on every hand.
#[derive(Debug, Default, Clone, Copy)]
pub struct Stayer;

impl Policy for Stayer {
    fn decide(&self, _: HandId, _: &Tracker) -> Action {
        Action::Stay
    }
}
