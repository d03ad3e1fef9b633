mod ledger;
mod outcome;

pub use ledger::*;
pub use outcome::*;
