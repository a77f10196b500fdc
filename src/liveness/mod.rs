//! The `liveness` module tracks whether the internal consumer is reachable.
//!
//! The consumer proves it is alive by polling; silence longer than the
//! configured expiry makes it unreachable again. The expiry is evaluated by a
//! background task rather than on the request path.

pub mod monitor;
pub mod tracker;

pub use monitor::spawn_expiry_monitor;
pub use tracker::{LivenessTracker, Reachability};

#[cfg(test)]
mod tests;
