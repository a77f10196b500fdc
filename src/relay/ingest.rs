//! Ingestion decisions
//!
//! Every refusal here is a request for the sender to retry later: webhook
//! senders resend on a failure-class status, and that resend is the relay's
//! only retry mechanism.

use tracing::debug;

use crate::liveness::Reachability;
use crate::relay::state::RelayState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// The message was buffered.
    Accepted,
    /// Blank payload: the sender checking that the hook is up. Nothing buffered.
    Probe,
    /// The consumer has not polled recently; nothing buffered.
    Unreachable,
    /// The buffer is at its limit; nothing buffered.
    BufferFull,
}

impl IngestOutcome {
    pub fn is_accepted(self) -> bool {
        matches!(self, IngestOutcome::Accepted | IngestOutcome::Probe)
    }
}

impl RelayState {
    /// Answer for HEAD/GET on the public hook: healthy only while the
    /// consumer is reachable.
    pub fn reachability(&self) -> Reachability {
        self.liveness.state()
    }

    /// Runs the ingestion sequence for one inbound request.
    ///
    /// `read_body` is only awaited once the consumer is known to be
    /// reachable. Reachability is checked again after the read, since the
    /// expiry monitor may have fired meanwhile. A read failure is returned
    /// as-is and nothing is buffered.
    pub async fn ingest<F, E>(&self, read_body: F) -> Result<IngestOutcome, E>
    where
        F: Future<Output = Result<String, E>>,
    {
        if self.liveness.is_not_alive() {
            return Ok(IngestOutcome::Unreachable);
        }

        let body = read_body.await?;
        if body.trim().is_empty() {
            return Ok(IngestOutcome::Probe);
        }
        debug!("got webhook message: '{}'", body);

        if self.liveness.is_not_alive() {
            return Ok(IngestOutcome::Unreachable);
        }

        if self.buffer.insert(body) {
            Ok(IngestOutcome::Accepted)
        } else {
            Ok(IngestOutcome::BufferFull)
        }
    }
}

/// Joins the payload's lines without a separator.
///
/// Retrieval frames messages one per line, so a payload must not carry its
/// own line breaks.
pub fn normalize_body(raw: &str) -> String {
    raw.lines().collect()
}
