//! In-memory transcript shared between the delivery pipeline and renderers.
//!
//! Every mutation goes through the watch sender's lock, so concurrent
//! completions are serialized and subscribers always observe whole
//! snapshots. Clones of [`TranscriptStore`] share the same transcript.

use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::message::{Message, MessageId};

/// Monotonic counter bumped once per mutation
pub type Revision = u64;

/// A consistent view of the conversation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    revision: Revision,
    messages: Vec<Message>,
}

impl Transcript {
    pub fn revision(&self) -> Revision {
        self.revision
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn position(&self, id: &MessageId) -> Option<usize> {
        self.messages.iter().position(|m| &m.id == id)
    }
}

/// Ordered, append-only (modulo in-place replacement) message store
#[derive(Debug, Clone)]
pub struct TranscriptStore {
    sender: Arc<watch::Sender<Transcript>>,
    torn_down: CancellationToken,
}

impl TranscriptStore {
    pub fn new() -> Self {
        Self::seeded(Vec::new())
    }

    /// Create a store that starts with the given messages
    pub fn seeded(messages: Vec<Message>) -> Self {
        let (sender, _) = watch::channel(Transcript { revision: 0, messages });
        Self { sender: Arc::new(sender), torn_down: CancellationToken::new() }
    }

    /// Add a message to the end of the transcript
    pub fn append(&self, message: Message) {
        if self.discarding("append", &message.id) {
            return;
        }

        tracing::debug!(id = %message.id, author = %message.author, "transcript append");
        self.sender.send_modify(|t| {
            t.messages.push(message);
            t.revision += 1;
        });
    }

    /// Append a message and return the messages matching `keep`, including
    /// the new one, as of that same mutation.
    pub fn append_and_collect(&self, message: Message, keep: impl Fn(&Message) -> bool) -> Vec<Message> {
        if self.discarding("append", &message.id) {
            let mut view = self.collect(&keep);
            if keep(&message) {
                view.push(message);
            }
            return view;
        }

        tracing::debug!(id = %message.id, author = %message.author, "transcript append");
        let mut view = Vec::new();
        self.sender.send_modify(|t| {
            t.messages.push(message);
            t.revision += 1;
            view = t.messages.iter().filter(|m| keep(m)).cloned().collect();
        });
        view
    }

    /// Replace the message with `id` in place and optionally append `extra`
    /// right after, as one mutation.
    ///
    /// # Panics
    ///
    /// Panics if no message has `id`, or if `updated` carries a different
    /// id. Both mean the caller's id bookkeeping is broken.
    pub fn replace_by_id(&self, id: &MessageId, updated: Message, extra: Option<Message>) {
        assert_eq!(&updated.id, id, "replace_by_id must keep the message id");

        if self.discarding("replace", id) {
            return;
        }

        let mut found = false;
        self.sender.send_if_modified(|t| {
            let Some(index) = t.position(id) else {
                return false;
            };
            found = true;
            t.messages[index] = updated;
            if let Some(extra) = extra {
                t.messages.push(extra);
            }
            t.revision += 1;
            true
        });

        assert!(found, "replace_by_id: no message with id {}", id);
        tracing::debug!(%id, "transcript replace");
    }

    /// Messages matching `keep`, in transcript order
    pub fn collect(&self, keep: impl Fn(&Message) -> bool) -> Vec<Message> {
        self.sender.borrow().messages.iter().filter(|m| keep(m)).cloned().collect()
    }

    pub fn snapshot(&self) -> Transcript {
        self.sender.borrow().clone()
    }

    pub fn get(&self, id: &MessageId) -> Option<Message> {
        let transcript = self.sender.borrow();
        transcript.position(id).map(|i| transcript.messages[i].clone())
    }

    pub fn len(&self) -> usize {
        self.sender.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sender.borrow().is_empty()
    }

    pub fn revision(&self) -> Revision {
        self.sender.borrow().revision
    }

    /// Receiver that wakes on every mutation
    pub fn subscribe(&self) -> watch::Receiver<Transcript> {
        self.sender.subscribe()
    }

    /// Stop accepting mutations; late completions are dropped quietly
    pub fn tear_down(&self) {
        self.torn_down.cancel();
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down.is_cancelled()
    }

    fn discarding(&self, op: &str, id: &MessageId) -> bool {
        let torn_down = self.is_torn_down();
        if torn_down {
            tracing::debug!(op, %id, "transcript torn down, discarding mutation");
        }
        torn_down
    }
}

impl Default for TranscriptStore {
    fn default() -> Self {
        Self::new()
    }
}
