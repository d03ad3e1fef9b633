mod gate;
mod gates;
mod kind;

pub use gate::*;
pub use gates::*;
pub use kind::*;
