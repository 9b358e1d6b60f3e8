use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("a Notion API key is required")]
    MissingCredential,
    #[error("missing required parameter `{0}`")]
    MissingParameter(&'static str),
    #[error("Notion API error: status {status}")]
    Upstream { status: u16 },
    #[error("could not reach Notion: {0}")]
    Network(String),
    #[error("request to Notion timed out")]
    Timeout,
    #[error("unexpected response from Notion: {0}")]
    MalformedResponse(String),
}

impl GatewayError {
    /// HTTP-equivalent status: caller mistakes are 400, everything upstream is 500.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingCredential | Self::MissingParameter(_) => 400,
            Self::Upstream { .. } | Self::Network(_) | Self::Timeout | Self::MalformedResponse(_) => {
                500
            }
        }
    }

    pub fn payload(&self) -> ErrorPayload {
        ErrorPayload {
            error: self.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
}
