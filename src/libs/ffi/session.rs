use crate::libs::api::http_client::HttpChatApi;
use crate::libs::core::config::ChatConfig;
use crate::libs::feed::rows::{message_rows, MessageRow};
use crate::libs::feed::store::FeedStore;
use crate::libs::ffi::models::{ChatMessage, FeedSnapshot};
use crate::libs::storage::database::storage_sqlite::SqliteStore;
use crate::libs::sync::session::BootstrapReport;
use crate::ChatError;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinHandle;

/// Implemented by the host UI to be told whenever the feed changes.
#[uniffi::export(callback_interface)]
pub trait FeedListener: Send + Sync {
    fn on_feed_changed(&self, snapshot: FeedSnapshot);
}

/// One mounted chat screen. Create it on mount, call [`ChatSession::unmount`]
/// (or drop it) when the screen goes away.
#[derive(uniffi::Object)]
pub struct ChatSession {
    store: FeedStore,
    listeners: Mutex<Vec<JoinHandle<()>>>,
}

impl ChatSession {
    pub fn from_store(store: FeedStore) -> Self {
        Self {
            store,
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn store(&self) -> &FeedStore {
        &self.store
    }

    fn open_store(config: &ChatConfig) -> Result<FeedStore, ChatError> {
        config.validate()?;
        let api = HttpChatApi::new(&config.api_base)?;
        let cache = SqliteStore::open(&config.database_path, &config.namespace)?;
        Ok(FeedStore::new(Arc::new(api), Arc::new(cache)))
    }

    fn stop_listeners(&self) {
        let mut listeners = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        for handle in listeners.drain(..) {
            handle.abort();
        }
    }
}

#[uniffi::export(async_runtime = "tokio")]
impl ChatSession {
    #[uniffi::constructor]
    pub fn new(config: ChatConfig) -> Result<Arc<Self>, ChatError> {
        let store = Self::open_store(&config)
            .inspect_err(|e| tracing::error!(error = %e, "chat session setup failed"))?;
        tracing::debug!(api_base = %config.api_base, namespace = %config.namespace, "chat session created");
        Ok(Arc::new(Self::from_store(store)))
    }

    pub async fn initialize(&self) -> Result<BootstrapReport, ChatError> {
        self.store.initialize().await
    }

    pub async fn fetch_latest(&self) -> Result<u64, ChatError> {
        let count = self.store.fetch_latest().await?;
        Ok(count as u64)
    }

    pub async fn send_message(&self) -> Result<Option<ChatMessage>, ChatError> {
        let sent = self.store.send_message().await?;
        Ok(sent.as_ref().map(ChatMessage::from))
    }

    pub fn set_input(&self, text: String) {
        self.store.set_input(text);
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        FeedSnapshot::from(&self.store.snapshot())
    }

    pub fn message_rows(&self) -> Vec<MessageRow> {
        let state = self.store.snapshot();
        message_rows(&state.messages, &state.participants)
    }

    /// Delivers the current snapshot right away, then one per change until
    /// the session is unmounted.
    pub async fn subscribe(&self, listener: Box<dyn FeedListener>) {
        let mut receiver = self.store.subscribe();
        let current = FeedSnapshot::from(&*receiver.borrow_and_update());
        listener.on_feed_changed(current);

        let handle = tokio::spawn(async move {
            while receiver.changed().await.is_ok() {
                let snapshot = FeedSnapshot::from(&*receiver.borrow_and_update());
                listener.on_feed_changed(snapshot);
            }
        });
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(handle);
    }

    pub fn unmount(&self) {
        self.stop_listeners();
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.stop_listeners();
    }
}
