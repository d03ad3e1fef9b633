mod registry;
mod split;
mod status;
mod tracker;

pub use registry::*;
pub use split::*;
pub use status::*;
pub use tracker::*;
