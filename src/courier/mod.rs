//! Outbound side of the protocol: commands, the transport seam, and the
//! worker that keeps command issuance off the event-delivery path.
mod command;
mod courier;
mod recorder;
mod worker;

pub use command::*;
pub use courier::*;
pub use recorder::*;
pub use worker::*;
