use serde::Deserialize;
use serde::Serialize;

/// Where the session stands in the protocol.
///
/// ```text
/// Init ─▶ AwaitingReady ─▶ Ready ─▶ Dealing ⇄ AwaitingTurnEnd
///   └────────────────────────▲        │             │
///                            │        ▼             ▼
///               Terminated ◀─ Ending ◀──────────────┘
///                                  └──▶ Dealing (next game)
/// ```
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Init,
    AwaitingReady,
    Ready,
    Dealing,
    AwaitingTurnEnd,
    Ending,
    Terminated,
}

impl Phase {
    /// A game is in progress.
    pub fn is_playing(&self) -> bool {
        matches!(self, Phase::Dealing | Phase::AwaitingTurnEnd)
    }
    /// A new game may start (or a bet may be placed).
    pub fn is_between_games(&self) -> bool {
        matches!(self, Phase::Ready | Phase::Ending)
    }
    /// READY has not arrived yet.
    pub fn is_arriving(&self) -> bool {
        matches!(self, Phase::Init | Phase::AwaitingReady)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Phase::Init => "init",
                Phase::AwaitingReady => "awaiting ready",
                Phase::Ready => "ready",
                Phase::Dealing => "dealing",
                Phase::AwaitingTurnEnd => "awaiting turn end",
                Phase::Ending => "ending",
                Phase::Terminated => "terminated",
            }
        )
    }
}
