//! Message buffer
//!
//! `MessageBuffer` is the in-memory holding area between the public webhook
//! and the internal consumer. Responsibilities:
//! - admit new messages while occupancy is below the configured limit
//! - hand every pending message to the consumer exactly once
//!
//! Concurrency and usage notes:
//! - All methods take `&self`; the buffer is meant to be shared behind an
//!   `Arc` by both HTTP surfaces without any outer lock.
//! - Each operation is a single short critical section. `insert` checks the
//!   limit and stores under the same lock, so concurrent inserts can never
//!   push occupancy past the limit.
//! - Capacity boundary: an insert is rejected once occupancy has reached the
//!   limit (`len >= limit`), so the buffer holds at most `limit` messages.

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::buffer::message::{Message, MessageId};

#[derive(Debug)]
pub struct MessageBuffer {
    messages: Mutex<HashMap<MessageId, Message>>,
    limit: usize,
}

impl MessageBuffer {
    pub fn new(limit: usize) -> Self {
        Self {
            messages: Mutex::new(HashMap::new()),
            limit,
        }
    }

    /// Stores `body` under a freshly generated id.
    ///
    /// Returns `false` without touching the buffer when it is already full.
    /// That is backpressure for the caller to relay, not an error.
    pub fn insert(&self, body: impl Into<String>) -> bool {
        let mut messages = self.messages.lock();
        if messages.len() >= self.limit {
            warn!(
                "message limit of {} reached, rejecting message",
                self.limit
            );
            return false;
        }

        let message = Message::new(body.into());
        debug!("message added: '{}'", message.body());
        messages.insert(message.id(), message);
        true
    }

    /// Removes and returns every pending message.
    ///
    /// The returned order is unspecified. An empty buffer yields an empty
    /// `Vec` without allocating.
    pub fn drain_all(&self) -> Vec<Message> {
        let pending = {
            let mut messages = self.messages.lock();
            if messages.is_empty() {
                return Vec::new();
            }
            std::mem::take(&mut *messages)
        };

        let out: Vec<Message> = pending.into_values().collect();
        debug!("got {} pending messages", out.len());
        out
    }

    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}
