use super::*;
use crate::Chips;
use crate::table::Seat;
use serde::Deserialize;
use serde::Serialize;
use std::sync::atomic::AtomicI64;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

/// Running P&L seen from one seat.
///
/// Amounts are taken as magnitudes; the sign comes from the outcome and
/// from whose hand it was. The local seat winning adds, an opponent
/// winning subtracts, and the reverse for losses. Pushes move nothing.
#[derive(Debug)]
pub struct Ledger {
    local: Seat,
    total: AtomicI64,
    tally: [AtomicUsize; 4],
}

impl Ledger {
    pub fn new(local: Seat) -> Self {
        Self {
            local,
            total: AtomicI64::new(0),
            tally: Default::default(),
        }
    }
    /// Signed change this settlement makes to the total.
    pub fn delta(&self, seat: Seat, outcome: Outcome, amount: Chips) -> Chips {
        let side = if seat == self.local { 1 } else { -1 };
        side * outcome.sign() * amount.saturating_abs()
    }
    /// Books one settlement and returns the signed change.
    pub fn apply(&self, seat: Seat, outcome: Outcome, amount: Chips) -> Chips {
        let delta = self.delta(seat, outcome, amount);
        self.total.fetch_add(delta, Ordering::SeqCst);
        self.tally[Self::slot(outcome)].fetch_add(1, Ordering::SeqCst);
        log::debug!("[ledger] {} {} {:+} → {:+}", seat, outcome, delta, self.total());
        delta
    }
    pub fn total(&self) -> Chips {
        self.total.load(Ordering::SeqCst)
    }
    /// Settlements booked with this outcome.
    pub fn count(&self, outcome: Outcome) -> usize {
        self.tally[Self::slot(outcome)].load(Ordering::SeqCst)
    }
    pub fn summary(&self) -> Summary {
        Summary {
            total: self.total(),
            wins: self.count(Outcome::Win),
            losses: self.count(Outcome::Lose),
            pushes: self.count(Outcome::Push),
            blackjacks: self.count(Outcome::Blackjack),
        }
    }
    fn slot(outcome: Outcome) -> usize {
        match outcome {
            Outcome::Win => 0,
            Outcome::Lose => 1,
            Outcome::Push => 2,
            Outcome::Blackjack => 3,
        }
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(Seat::You)
    }
}

/// Point-in-time view of a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: Chips,
    pub wins: usize,
    pub losses: usize,
    pub pushes: usize,
    pub blackjacks: usize,
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{:+} (W{} L{} P{} BJ{})",
            self.total, self.wins, self.losses, self.pushes, self.blackjacks
        )
    }
}
