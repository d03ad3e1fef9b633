use super::*;

/// One gate per phase the driving task cares about.
#[derive(Debug)]
pub struct Gates {
    ready: Gate,
    turn: Gate,
    ending: Gate,
}

impl Gates {
    pub fn get(&self, kind: GateKind) -> &Gate {
        match kind {
            GateKind::Ready => &self.ready,
            GateKind::Turn => &self.turn,
            GateKind::Ending => &self.ending,
        }
    }
    pub fn open(&self, kind: GateKind) {
        self.get(kind).open();
    }
    /// Drops any pending opens, e.g. after a reset.
    pub fn close_all(&self) {
        self.ready.close();
        self.turn.close();
        self.ending.close();
    }
}

impl Default for Gates {
    fn default() -> Self {
        Self {
            ready: Gate::new(GateKind::Ready),
            turn: Gate::new(GateKind::Turn),
            ending: Gate::new(GateKind::Ending),
        }
    }
}
