use banter_core::MessageId;
use serde::{Deserialize, Serialize};

/// Body returned by the send endpoint.
///
/// On the wire both shapes share one object and `error` is the
/// discriminant: `{ error: false, id, response }` or
/// `{ error: true, id, errorResponse }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawResponse", into = "RawResponse")]
pub enum SendMessageResponse {
    Success { id: MessageId, response: String },
    Failure { id: MessageId, error_response: String },
}

impl SendMessageResponse {
    pub fn success(id: impl Into<MessageId>, response: impl Into<String>) -> Self {
        Self::Success { id: id.into(), response: response.into() }
    }

    pub fn failure(id: impl Into<MessageId>, error_response: impl Into<String>) -> Self {
        Self::Failure { id: id.into(), error_response: error_response.into() }
    }

    /// Correlation id assigned by the service
    pub fn id(&self) -> &MessageId {
        match self {
            Self::Success { id, .. } | Self::Failure { id, .. } => id,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResponse {
    error: bool,
    id: MessageId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error_response: Option<String>,
}

impl TryFrom<RawResponse> for SendMessageResponse {
    type Error = String;

    fn try_from(raw: RawResponse) -> Result<Self, Self::Error> {
        match (raw.error, raw.response, raw.error_response) {
            (false, Some(response), _) => Ok(Self::Success { id: raw.id, response }),
            (false, None, _) => Err("success response without `response` field".to_string()),
            (true, _, Some(error_response)) => Ok(Self::Failure { id: raw.id, error_response }),
            (true, _, None) => Err("error response without `errorResponse` field".to_string()),
        }
    }
}

impl From<SendMessageResponse> for RawResponse {
    fn from(response: SendMessageResponse) -> Self {
        match response {
            SendMessageResponse::Success { id, response } => {
                Self { error: false, id, response: Some(response), error_response: None }
            }
            SendMessageResponse::Failure { id, error_response } => {
                Self { error: true, id, response: None, error_response: Some(error_response) }
            }
        }
    }
}
