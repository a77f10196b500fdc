use uuid::Uuid;

/// Opaque identifier assigned to a message when it enters the buffer.
///
/// Only uniqueness within the buffer's lifetime matters; ids are never
/// written to the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct MessageId(Uuid);

impl MessageId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// A pending inbound notification.
///
/// The body is whatever the sender posted (typically a JSON document). The
/// relay never parses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    id: MessageId,
    body: String,
}

impl Message {
    pub(crate) fn new(body: String) -> Self {
        Self {
            id: MessageId::generate(),
            body,
        }
    }

    pub(crate) fn id(&self) -> MessageId {
        self.id
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn into_body(self) -> String {
        self.body
    }
}
