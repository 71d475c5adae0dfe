//! Line relay
//!
//! The outbound half of the pipeline: an optional rate-limiting delivery
//! queue and the single-viewer broadcaster with CONFIG replay for late
//! joiners.

pub mod broadcaster;
pub mod queue;

pub use broadcaster::{Broadcaster, ViewerHandle};
pub use queue::DeliveryQueue;
