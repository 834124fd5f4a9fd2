use crate::libs::core::models::{Message, Participant, SessionInfo};
use async_trait::async_trait;
use thiserror::Error;

/// The remote chat service as seen by the client. Every call is a single
/// request with no retry.
#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn fetch_session_info(&self) -> Result<SessionInfo, ApiError>;
    async fn fetch_latest_messages(&self) -> Result<Vec<Message>, ApiError>;
    async fn fetch_all_participants(&self) -> Result<Vec<Participant>, ApiError>;
    async fn post_message(&self, text: &str) -> Result<Message, ApiError>;
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request to {endpoint} failed: {source}")]
    Request {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("Request to {endpoint} returned status {status}")]
    Status { endpoint: &'static str, status: u16 },
    #[error("Could not decode response from {endpoint}: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("Could not build http client: {0}")]
    Client(reqwest::Error),
    /// Used by in-process test doubles that have no transport.
    #[error("{0}")]
    Other(String),
}
