use crate::message::MessageId;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of unique message identifiers
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> MessageId;
}

/// Random UUIDv4 identifiers, unique across processes as well
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self) -> MessageId {
        MessageId::new(uuid::Uuid::new_v4().to_string())
    }
}

/// Predictable `<prefix>-<n>` identifiers for tests and replays
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), counter: AtomicU64::new(0) }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> MessageId {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        MessageId::new(format!("{}-{}", self.prefix, n))
    }
}
