use crate::table::HandId;
use serde::Deserialize;
use serde::Serialize;

/// Where a hand is in its life within one game.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Still receiving cards and turns.
    Live,
    /// Broke; the paired lose event settles it.
    Busted,
    /// Five-card Charlie; the paired win event settles it.
    Charlie,
    /// Money moved.
    Settled,
    /// Replaced by two children.
    Split,
    /// Game over.
    Retired,
}

impl Status {
    /// Whether a settling event may still arrive for this hand.
    pub fn is_settleable(&self) -> bool {
        matches!(self, Status::Live | Status::Busted | Status::Charlie)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Status::Live => "live",
                Status::Busted => "busted",
                Status::Charlie => "charlie",
                Status::Settled => "settled",
                Status::Split => "split",
                Status::Retired => "retired",
            }
        )
    }
}

/// How a hand came to be registered.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Origin {
    /// Listed by the dealer when the game started.
    Dealt,
    /// Produced by splitting another hand.
    Split { parent: HandId },
}
