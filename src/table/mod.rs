mod hid;
mod seat;

pub use hid::*;
pub use seat::*;
