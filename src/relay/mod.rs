//! The `relay` module holds the accept/retry protocol between the public
//! webhook and the internal consumer, independent of any transport.
//!
//! - `state`: `RelayState`, the buffer, tracker and shared secret handed to
//!   both surfaces.
//! - `ingest`: the check / short-circuit / re-check / insert sequence.
//! - `retrieve`: authenticate, heartbeat, drain and serialize.

pub mod ingest;
pub mod retrieve;
pub mod state;

pub use ingest::IngestOutcome;
pub use retrieve::{AuthRejection, PollBatch};
pub use state::RelayState;
