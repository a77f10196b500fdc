use tracing::{debug, warn};

use crate::buffer::Message;
use crate::relay::state::RelayState;

/// Separator written after every message in a poll response.
pub const MESSAGE_SEPARATOR: char = '\n';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    /// No credential, or a blank one.
    Missing,
    /// A credential that does not match the configured token.
    Invalid,
}

/// Messages handed to the consumer by one poll.
#[derive(Debug, Default)]
pub struct PollBatch {
    messages: Vec<Message>,
}

impl PollBatch {
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Wire form: each body followed by `\n`, or an empty string when the
    /// batch is empty.
    pub fn to_payload(&self) -> String {
        if self.messages.is_empty() {
            return String::new();
        }

        let size = self.messages.iter().map(|m| m.body().len() + 1).sum();
        let mut out = String::with_capacity(size);
        for message in &self.messages {
            out.push_str(message.body());
            out.push(MESSAGE_SEPARATOR);
        }
        out
    }
}

impl RelayState {
    /// Validates the poller's credential without touching any state.
    pub fn authenticate(&self, credential: Option<&str>) -> Result<(), AuthRejection> {
        let credential = match credential {
            Some(c) if !c.trim().is_empty() => c,
            _ => {
                warn!("no authentication token");
                return Err(AuthRejection::Missing);
            }
        };

        if credential != self.api_token() {
            warn!("invalid authentication token");
            return Err(AuthRejection::Invalid);
        }
        Ok(())
    }

    /// Handles one poll from the internal consumer.
    ///
    /// A rejected credential returns before the heartbeat and the drain, so a
    /// failed poll neither keeps the consumer alive nor loses messages.
    pub fn poll(&self, credential: Option<&str>) -> Result<PollBatch, AuthRejection> {
        self.authenticate(credential)?;

        self.liveness.mark_alive();
        let batch = PollBatch {
            messages: self.buffer.drain_all(),
        };
        if !batch.is_empty() {
            debug!("transferred {} messages", batch.len());
        }
        Ok(batch)
    }
}
