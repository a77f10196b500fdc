use std::sync::Arc;

use crate::buffer::MessageBuffer;
use crate::config::Settings;
use crate::liveness::LivenessTracker;

/// Largest accepted webhook payload unless configured otherwise (1 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Shared state for both HTTP surfaces.
///
/// Constructed once at startup and passed to each listener behind an `Arc`.
/// The buffer and tracker are themselves `Arc`s so the expiry monitor can
/// hold the tracker on its own.
#[derive(Debug)]
pub struct RelayState {
    pub buffer: Arc<MessageBuffer>,
    pub liveness: Arc<LivenessTracker>,
    api_token: String,
    max_body_bytes: usize,
}

impl RelayState {
    pub fn new(
        buffer: Arc<MessageBuffer>,
        liveness: Arc<LivenessTracker>,
        api_token: impl Into<String>,
    ) -> Self {
        Self {
            buffer,
            liveness,
            api_token: api_token.into(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            Arc::new(MessageBuffer::new(settings.buffer.max_messages)),
            Arc::new(LivenessTracker::from_minutes(
                settings.liveness.expiry_minutes,
            )),
            settings.auth.api_token.clone(),
        )
        .with_max_body_bytes(settings.buffer.max_body_bytes)
    }

    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }

    pub(crate) fn api_token(&self) -> &str {
        &self.api_token
    }
}
