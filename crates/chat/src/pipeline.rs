//! Delivery of composed messages to the chat service.
//!
//! Each submission moves through `Composed → Optimistic → Delivered | Failed`.
//! The optimistic user message is in the transcript before any network I/O,
//! and reconciliation is always keyed by that message's id, so submissions
//! may overlap and resolve in any order without disturbing transcript order.

use std::fmt;
use std::sync::Arc;

use banter_core::logging::{PrivacyConfig, redact_sensitive};
use banter_core::{
    DEFAULT_TEMPERATURE, IdGenerator, Message, MessageId, SessionProvider, TranscriptStore, UuidIds, now_millis,
};
use banter_providers::{ChatBackend, SendMessageResponse};
use tokio::task::JoinHandle;

use crate::Composer;

/// Where a submitted message is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryState {
    Optimistic,
    Delivered,
    Failed,
}

impl DeliveryState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Failed)
    }
}

/// Why a message did not get a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The service answered with its error shape
    Remote { response_id: MessageId, reason: String },
    /// The exchange itself failed
    Transport(String),
}

impl FailureReason {
    fn response_id(&self) -> Option<&MessageId> {
        match self {
            Self::Remote { response_id, .. } => Some(response_id),
            Self::Transport(_) => None,
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote { reason, .. } => f.write_str(reason),
            Self::Transport(detail) => write!(f, "could not reach the chat service: {}", detail),
        }
    }
}

/// A user message that has been placed in the transcript and is ready to send
#[derive(Debug, Clone)]
pub struct Submission {
    message: Message,
    payload: Vec<Message>,
}

impl Submission {
    pub fn id(&self) -> &MessageId {
        &self.message.id
    }

    /// The optimistic user message as appended
    pub fn message(&self) -> &Message {
        &self.message
    }

    /// Conversation that will be posted, system and failed entries removed
    pub fn payload(&self) -> &[Message] {
        &self.payload
    }

    pub fn state(&self) -> DeliveryState {
        DeliveryState::Optimistic
    }
}

/// Terminal result of one submission
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryOutcome {
    Delivered { user_id: MessageId, reply: Message },
    Failed { user_id: MessageId, reason: FailureReason, notice: Message },
}

impl DeliveryOutcome {
    pub fn user_id(&self) -> &MessageId {
        match self {
            Self::Delivered { user_id, .. } | Self::Failed { user_id, .. } => user_id,
        }
    }

    pub fn state(&self) -> DeliveryState {
        match self {
            Self::Delivered { .. } => DeliveryState::Delivered,
            Self::Failed { .. } => DeliveryState::Failed,
        }
    }
}

/// Turns composed text into transcript mutations and service calls
#[derive(Clone)]
pub struct DeliveryPipeline {
    store: TranscriptStore,
    backend: Arc<dyn ChatBackend>,
    session: Arc<dyn SessionProvider>,
    ids: Arc<dyn IdGenerator>,
    privacy: PrivacyConfig,
}

impl DeliveryPipeline {
    pub fn new(store: TranscriptStore, backend: Arc<dyn ChatBackend>, session: Arc<dyn SessionProvider>) -> Self {
        Self { store, backend, session, ids: Arc::new(UuidIds), privacy: PrivacyConfig::default() }
    }

    pub fn with_ids(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Controls how message bodies appear in log events
    pub fn with_privacy(mut self, privacy: PrivacyConfig) -> Self {
        self.privacy = privacy;
        self
    }

    pub fn store(&self) -> &TranscriptStore {
        &self.store
    }

    /// Composed → Optimistic.
    ///
    /// Appends the user message and captures the outgoing conversation in
    /// the same store mutation. No I/O happens here.
    pub fn begin(&self, text: impl Into<String>) -> Submission {
        let message = Message::user(self.ids.next_id(), now_millis(), text)
            .with_username(self.session.display_name())
            .with_temperature(Some(DEFAULT_TEMPERATURE));

        tracing::info!(
            id = %message.id,
            username = ?message.username,
            body = %redact_sensitive(&message.message, &self.privacy),
            "message composed"
        );

        let payload = self.store.append_and_collect(message.clone(), Message::is_deliverable);
        Submission { message, payload }
    }

    /// Optimistic → Delivered | Failed.
    ///
    /// Always reaches a terminal state: transport failures are treated like
    /// failures reported by the service.
    pub async fn deliver(&self, submission: Submission) -> DeliveryOutcome {
        let Submission { message, payload } = submission;
        tracing::debug!(id = %message.id, messages = payload.len(), "sending conversation");

        match self.backend.send(&payload).await {
            Ok(SendMessageResponse::Success { id, response }) => self.reconcile_reply(message, id, response),
            Ok(SendMessageResponse::Failure { id, error_response }) => {
                self.reconcile_failure(message, FailureReason::Remote { response_id: id, reason: error_response })
            }
            Err(e) => self.reconcile_failure(message, FailureReason::Transport(e.to_string())),
        }
    }

    /// Begin a submission and deliver it on a spawned task.
    ///
    /// Returns `None` once the store has been torn down; nothing is sent.
    pub fn submit(&self, text: impl Into<String>) -> Option<JoinHandle<DeliveryOutcome>> {
        if self.store.is_torn_down() {
            tracing::debug!("transcript torn down, not sending");
            return None;
        }

        let submission = self.begin(text);
        let pipeline = self.clone();
        Some(tokio::spawn(async move { pipeline.deliver(submission).await }))
    }

    /// Submit whatever the composer holds; blank drafts do nothing
    pub fn submit_draft(&self, composer: &mut Composer) -> Option<JoinHandle<DeliveryOutcome>> {
        let text = composer.submit()?;
        self.submit(text)
    }

    fn reconcile_reply(&self, user: Message, reply_id: MessageId, response: String) -> DeliveryOutcome {
        tracing::info!(
            id = %user.id,
            reply_id = %reply_id,
            body = %redact_sensitive(&response, &self.privacy),
            "reply received"
        );

        let reply = Message::bot(reply_id, now_millis(), response).with_temperature(user.temperature);
        self.store.append(reply.clone());
        DeliveryOutcome::Delivered { user_id: user.id, reply }
    }

    fn reconcile_failure(&self, user: Message, reason: FailureReason) -> DeliveryOutcome {
        tracing::warn!(id = %user.id, %reason, "message failed to send");

        let response_id = reason.response_id().map_or_else(|| "none".to_string(), MessageId::to_string);
        let notice = Message::system(
            self.ids.next_id(),
            now_millis(),
            format!(
                "An error occurred when sending message {}.\nResponse ID: {}\nReason: {}",
                user.id, response_id, reason
            ),
        );

        self.store.replace_by_id(&user.id, user.mark_failed(), Some(notice.clone()));
        DeliveryOutcome::Failed { user_id: user.id, reason, notice }
    }
}
