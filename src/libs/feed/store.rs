use crate::libs::api::api_traits::ChatApi;
use crate::libs::core::models::{Message, ParticipantMap};
use crate::libs::storage::storage_traits::SessionCache;
use crate::libs::sync::session::{self, BootstrapReport};
use crate::ChatError;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeedState {
    pub messages: Vec<Message>,
    pub participants: ParticipantMap,
    pub input: String,
}

/// State behind one mounted chat screen.
///
/// All mutation goes through a single `watch` container and every operation
/// installs its result in one update, so observers never see half an
/// operation. Operations are not serialized against each other: a send and a
/// fetch that overlap finish in whatever order the network decides.
///
/// Failures are logged here and still returned, callers are free to ignore
/// them.
pub struct FeedStore {
    api: Arc<dyn ChatApi>,
    cache: Arc<dyn SessionCache>,
    state: watch::Sender<FeedState>,
}

impl FeedStore {
    pub fn new(api: Arc<dyn ChatApi>, cache: Arc<dyn SessionCache>) -> Self {
        let (state, _) = watch::channel(FeedState::default());
        Self { api, cache, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> FeedState {
        self.state.borrow().clone()
    }

    pub async fn initialize(&self) -> Result<BootstrapReport, ChatError> {
        let bootstrap = session::bootstrap(self.api.as_ref(), Arc::clone(&self.cache))
            .await
            .inspect_err(|e| tracing::error!(error = %e, "initialization failed"))?;

        let report = BootstrapReport::from(&bootstrap);
        self.state.send_modify(|state| {
            state.messages = bootstrap.messages;
            state.participants = bootstrap.participants;
        });
        tracing::debug!(
            messages = report.message_count,
            participants = report.participant_count,
            "feed initialized"
        );
        Ok(report)
    }

    /// Replaces the message list with the server's latest page.
    pub async fn fetch_latest(&self) -> Result<usize, ChatError> {
        let messages = self
            .api
            .fetch_latest_messages()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "fetch latest failed"))?;

        let count = messages.len();
        self.state.send_modify(|state| state.messages = messages);
        Ok(count)
    }

    pub fn set_input(&self, text: impl Into<String>) {
        let text = text.into();
        self.state.send_modify(|state| state.input = text);
    }

    /// Sends the current input. Returns `Ok(None)` without touching the
    /// network when the input is blank. The input is kept if the send fails.
    pub async fn send_message(&self) -> Result<Option<Message>, ChatError> {
        let input = self.state.borrow().input.clone();
        if input.trim().is_empty() {
            return Ok(None);
        }

        let message = self
            .api
            .post_message(&input)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "send message failed"))?;

        self.state.send_modify(|state| {
            state.messages.push(message.clone());
            state.input.clear();
        });
        Ok(Some(message))
    }
}
