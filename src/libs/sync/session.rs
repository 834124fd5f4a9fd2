use crate::libs::api::api_traits::ChatApi;
use crate::libs::core::models::{index_participants, Message, ParticipantMap};
use crate::libs::storage::storage_traits::SessionCache;
use crate::ChatError;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq)]
pub enum SessionOutcome {
    /// Cached identifier matched the server's; local state was not touched.
    Unchanged,
    /// Local state was cleared and the new identifier persisted.
    Reset { previous: Option<String> },
}

impl SessionOutcome {
    pub fn was_reset(&self) -> bool {
        matches!(self, SessionOutcome::Reset { .. })
    }
}

/// Everything a screen needs to render after mounting.
#[derive(Debug)]
pub struct Bootstrap {
    pub session: SessionOutcome,
    pub messages: Vec<Message>,
    pub participants: ParticipantMap,
}

#[derive(Clone, Debug, PartialEq, uniffi::Record)]
pub struct BootstrapReport {
    pub session_reset: bool,
    pub message_count: u64,
    pub participant_count: u64,
}

impl From<&Bootstrap> for BootstrapReport {
    fn from(bootstrap: &Bootstrap) -> Self {
        Self {
            session_reset: bootstrap.session.was_reset(),
            message_count: bootstrap.messages.len() as u64,
            participant_count: bootstrap.participants.len() as u64,
        }
    }
}

/// Compares the server's session identifier with the cached one and resets
/// local state on any mismatch, including a missing cached value.
pub async fn reconcile_session(
    cache: Arc<dyn SessionCache>,
    server_session_id: String,
) -> Result<SessionOutcome, ChatError> {
    let outcome = tokio::task::spawn_blocking(move || {
        let previous = cache.load_session_id()?;
        if previous.as_deref() == Some(server_session_id.as_str()) {
            return Ok(SessionOutcome::Unchanged);
        }
        cache.reset_session(&server_session_id)?;
        Ok::<_, ChatError>(SessionOutcome::Reset { previous })
    })
    .await??;

    if let SessionOutcome::Reset { previous } = &outcome {
        tracing::info!(previous = ?previous, "server session changed, local state reset");
    }
    Ok(outcome)
}

pub async fn bootstrap(
    api: &dyn ChatApi,
    cache: Arc<dyn SessionCache>,
) -> Result<Bootstrap, ChatError> {
    let info = api.fetch_session_info().await?;
    let session = reconcile_session(cache, info.session_uuid).await?;

    let (messages, participants) =
        tokio::try_join!(api.fetch_latest_messages(), api.fetch_all_participants())?;

    Ok(Bootstrap {
        session,
        messages,
        participants: index_participants(participants),
    })
}
