//! The `client` module is the consumer side of the internal retrieval API.
//!
//! `PollClient` performs the same authenticated GET the internal consumer
//! does. The binary uses it for the `poll` diagnostic subcommand.

pub mod poll_client;
pub use poll_client::{PollClient, PollResponse};
