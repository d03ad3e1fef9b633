use serde::Deserialize;
use serde::Serialize;

/// Protocol phases a driving task can wait for.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateKind {
    /// Dealer acknowledged our arrival.
    Ready,
    /// Our turn passed to someone else.
    Turn,
    /// Game finished.
    Ending,
}

impl std::fmt::Display for GateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                GateKind::Ready => "ready",
                GateKind::Turn => "turn",
                GateKind::Ending => "ending",
            }
        )
    }
}
