//! Session events
//!
//! All asynchronous entry points (input lines, viewer connects and closes)
//! funnel into one channel with a single consumer, which is what keeps
//! exactly one line in flight through the state machine at a time.

use crate::relay::ViewerHandle;

/// An event delivered to the session loop
#[derive(Debug)]
pub enum SessionEvent {
    /// A raw input line, terminator already stripped
    Line(String),
    /// A viewer connected; the handle carries its outbound line stream
    ViewerConnected(ViewerHandle),
    /// The viewer with the given id disconnected
    ViewerClosed(u64),
}
