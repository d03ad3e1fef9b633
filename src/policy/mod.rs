//! Pluggable decisions for the local player's turns.
mod action;
mod policy;
mod splitter;
mod stayer;
mod threshold;

pub use action::*;
pub use policy::*;
pub use splitter::*;
pub use stayer::*;
pub use threshold::*;
