//! A dealer that plays from a script, and everything needed to run the
//! session controller against it end to end.
mod agent;
mod pump;
mod scenario;
mod scripted;

pub use agent::*;
pub use pump::*;
pub use scenario::*;
pub use scripted::*;
