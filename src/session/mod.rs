mod config;
mod controller;
mod event;
mod phase;

pub use config::*;
pub use controller::*;
pub use event::*;
pub use phase::*;
