use crate::ChatBackend;
use crate::types::SendMessageResponse;
use banter_core::{Error, Message, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Scripted replies for deterministic runs without a chat service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MockReply {
    Success { id: String, response: String },
    Failure { id: String, reason: String },
    /// The exchange itself fails (as if the network dropped)
    Transport { message: String },
}

/// Mock configuration from TOML file
#[derive(Debug, Deserialize)]
struct MockConfig {
    replies: Vec<MockReply>,
}

/// Backend that answers from a fixed script and records every request
pub struct MockBackend {
    replies: Vec<MockReply>,
    current: AtomicUsize,
    requests: Mutex<Vec<Vec<Message>>>,
}

impl MockBackend {
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self { replies, current: AtomicUsize::new(0), requests: Mutex::new(Vec::new()) }
    }

    /// Load replies from a TOML file with a `[[replies]]` array
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: MockConfig =
            toml::from_str(content).map_err(|e| Error::Parse(format!("Failed to parse mock replies: {}", e)))?;
        Ok(Self::new(config.replies))
    }

    /// Conversations received so far, in call order
    pub fn requests(&self) -> Vec<Vec<Message>> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn call_count(&self) -> usize {
        self.current.load(Ordering::SeqCst)
    }

    fn next_reply(&self) -> MockReply {
        let index = self.current.fetch_add(1, Ordering::SeqCst);
        match self.replies.get(index) {
            Some(reply) => reply.clone(),
            None => MockReply::Success {
                id: format!("mock-{}", index + 1),
                response: format!(
                    "No more mock replies configured (requested: {}, available: {})",
                    index + 1,
                    self.replies.len()
                ),
            },
        }
    }
}

#[async_trait::async_trait]
impl ChatBackend for MockBackend {
    async fn send(&self, conversation: &[Message]) -> Result<SendMessageResponse> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).push(conversation.to_vec());

        match self.next_reply() {
            MockReply::Success { id, response } => Ok(SendMessageResponse::success(id, response)),
            MockReply::Failure { id, reason } => Ok(SendMessageResponse::failure(id, reason)),
            MockReply::Transport { message } => {
                tracing::warn!("mock transport failure: {}", message);
                Err(Error::Backend(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use banter_core::MessageId;
    use std::io::Write;

    #[test]
    fn test_mock_reply_parsing() {
        let toml = r#"
[[replies]]
type = "success"
id = "m1"
response = "hi there"

[[replies]]
type = "failure"
id = "m2"
reason = "rate limited"

[[replies]]
type = "transport"
message = "connection reset"
"#;

        let backend = MockBackend::from_toml_str(toml).unwrap();
        assert_eq!(backend.replies.len(), 3);
        assert!(matches!(backend.replies[0], MockReply::Success { .. }));
        assert!(matches!(backend.replies[1], MockReply::Failure { .. }));
        assert!(matches!(backend.replies[2], MockReply::Transport { .. }));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let err = MockBackend::from_toml_str("[[replies]]\ntype = \"bogus\"").err().unwrap();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[[replies]]\ntype = \"success\"\nid = \"a\"\nresponse = \"b\"").unwrap();
        let backend = MockBackend::from_file(file.path()).unwrap();
        assert_eq!(backend.replies.len(), 1);
    }

    #[tokio::test]
    async fn test_replies_in_order_and_records_requests() {
        let backend = MockBackend::new(vec![
            MockReply::Success { id: "m1".to_string(), response: "hi".to_string() },
            MockReply::Failure { id: "m2".to_string(), reason: "nope".to_string() },
            MockReply::Transport { message: "offline".to_string() },
        ]);
        let conversation = vec![Message::user(MessageId::new("u1"), 0, "hello")];

        assert_eq!(backend.send(&conversation).await.unwrap(), SendMessageResponse::success("m1", "hi"));
        assert_eq!(backend.send(&conversation).await.unwrap(), SendMessageResponse::failure("m2", "nope"));
        assert!(matches!(backend.send(&conversation).await, Err(Error::Backend(_))));

        assert_eq!(backend.call_count(), 3);
        assert_eq!(backend.requests().len(), 3);
        assert_eq!(backend.requests()[0][0].message, "hello");
    }

    #[tokio::test]
    async fn test_exhausted_script_keeps_answering() {
        let backend = MockBackend::new(Vec::new());
        let response = backend.send(&[]).await.unwrap();
        match response {
            SendMessageResponse::Success { id, response } => {
                assert_eq!(id.as_str(), "mock-1");
                assert!(response.contains("No more mock replies"));
            }
            other => panic!("Expected success, got {:?}", other),
        }
    }
}
