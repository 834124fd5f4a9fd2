use crate::libs::api::api_traits::{ApiError, ChatApi};
use crate::libs::core::models::{Message, NewMessage, Participant, SessionInfo};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

pub const INFO_PATH: &str = "/info";
pub const LATEST_MESSAGES_PATH: &str = "/messages/latest";
pub const ALL_PARTICIPANTS_PATH: &str = "/participants/all";
pub const NEW_MESSAGE_PATH: &str = "/messages/new";

/// [`ChatApi`] over HTTP/JSON. Uses the transport's default timeouts.
#[derive(Clone, Debug)]
pub struct HttpChatApi {
    client: Client,
    base_url: String,
}

impl HttpChatApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder().build().map_err(ApiError::Client)?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        tracing::debug!(endpoint, "sending request");
        let response = request
            .send()
            .await
            .map_err(|source| ApiError::Request { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| ApiError::Decode { endpoint, source })
    }
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn fetch_session_info(&self) -> Result<SessionInfo, ApiError> {
        let request = self.client.get(self.endpoint(INFO_PATH));
        self.send_json(INFO_PATH, request).await
    }

    async fn fetch_latest_messages(&self) -> Result<Vec<Message>, ApiError> {
        let request = self.client.get(self.endpoint(LATEST_MESSAGES_PATH));
        self.send_json(LATEST_MESSAGES_PATH, request).await
    }

    async fn fetch_all_participants(&self) -> Result<Vec<Participant>, ApiError> {
        let request = self.client.get(self.endpoint(ALL_PARTICIPANTS_PATH));
        self.send_json(ALL_PARTICIPANTS_PATH, request).await
    }

    async fn post_message(&self, text: &str) -> Result<Message, ApiError> {
        let body = NewMessage {
            text: text.to_string(),
        };
        let request = self.client.post(self.endpoint(NEW_MESSAGE_PATH)).json(&body);
        self.send_json(NEW_MESSAGE_PATH, request).await
    }
}
