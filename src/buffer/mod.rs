//! The `buffer` module holds inbound messages until the internal consumer
//! polls for them.
//!
//! - `message`: the stored `Message` and its opaque identifier.
//! - `store`: `MessageBuffer`, the capacity-bounded holding area.

pub mod message;
pub mod store;

pub use message::Message;
pub use store::MessageBuffer;

#[cfg(test)]
mod tests;
