#![allow(dead_code)]

use async_trait::async_trait;
use chat_feed_lib::libs::api::api_traits::{ApiError, ChatApi};
use chat_feed_lib::libs::core::models::{Message, Participant, SessionInfo};
use chat_feed_lib::libs::storage::database::storage_sqlite::{SqliteStore, SqliteTransaction};
use chat_feed_lib::libs::storage::storage_traits::{
    KeyValueStore, SessionCache, StoreError, Transactional,
};
use chrono::{TimeZone, Utc};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tokio::sync::Notify;

pub const NAMESPACE: &str = "chat";

pub const INFO: &str = "info";
pub const LATEST: &str = "latest";
pub const PARTICIPANTS: &str = "participants";
pub const POST: &str = "post";

/// What the fake server answers and what it has been asked.
#[derive(Default)]
pub struct FakeState {
    pub session_uuid: String,
    pub latest: Vec<Message>,
    pub participants: Vec<Participant>,
    pub reply: Option<Message>,
    pub failing: Vec<&'static str>,
    pub calls: Vec<&'static str>,
    pub posted: Vec<String>,
    /// When set, `post_message` waits for a notification before answering.
    pub post_gate: Option<Arc<Notify>>,
}

#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn new(session_uuid: &str) -> Arc<Self> {
        let api = Self::default();
        api.with(|state| state.session_uuid = session_uuid.to_string());
        Arc::new(api)
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut FakeState) -> R) -> R {
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.with(|state| state.calls.clone())
    }

    pub fn posted(&self) -> Vec<String> {
        self.with(|state| state.posted.clone())
    }

    fn record(&self, endpoint: &'static str) -> Result<(), ApiError> {
        self.with(|state| {
            state.calls.push(endpoint);
            if state.failing.contains(&endpoint) {
                Err(ApiError::Other(format!("{endpoint} unavailable")))
            } else {
                Ok(())
            }
        })
    }
}

#[async_trait]
impl ChatApi for FakeApi {
    async fn fetch_session_info(&self) -> Result<SessionInfo, ApiError> {
        self.record(INFO)?;
        Ok(self.with(|state| SessionInfo {
            session_uuid: state.session_uuid.clone(),
        }))
    }

    async fn fetch_latest_messages(&self) -> Result<Vec<Message>, ApiError> {
        self.record(LATEST)?;
        Ok(self.with(|state| state.latest.clone()))
    }

    async fn fetch_all_participants(&self) -> Result<Vec<Participant>, ApiError> {
        self.record(PARTICIPANTS)?;
        Ok(self.with(|state| state.participants.clone()))
    }

    async fn post_message(&self, text: &str) -> Result<Message, ApiError> {
        if let Some(gate) = self.with(|state| state.post_gate.clone()) {
            gate.notified().await;
        }
        self.record(POST)?;
        Ok(self.with(|state| {
            state.posted.push(text.to_string());
            state.reply.clone().unwrap_or_else(|| {
                message(&format!("sent-{}", state.posted.len()), "me", text)
            })
        }))
    }
}

/// Session cache whose disk has gone away.
pub enum BrokenCache {
    FailingLoad,
    /// Loads a stale id, then fails to reset.
    FailingReset,
}

fn disk_error() -> StoreError {
    StoreError::Sqlite(rusqlite::Error::SqliteFailure(
        rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_IOERR),
        Some("disk I/O error".to_string()),
    ))
}

impl SessionCache for BrokenCache {
    fn load_session_id(&self) -> Result<Option<String>, StoreError> {
        match self {
            BrokenCache::FailingLoad => Err(disk_error()),
            BrokenCache::FailingReset => Ok(Some("stale".to_string())),
        }
    }

    fn reset_session(&self, _session_id: &str) -> Result<(), StoreError> {
        Err(disk_error())
    }
}

pub fn message(uuid: &str, author_uuid: &str, text: &str) -> Message {
    Message {
        uuid: uuid.to_string(),
        author_uuid: author_uuid.to_string(),
        text: text.to_string(),
        sent_at: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
        updated_at: None,
        reply_to_message: None,
        attachments: Vec::new(),
        reactions: Vec::new(),
    }
}

pub fn participant(uuid: &str, name: &str) -> Participant {
    Participant {
        uuid: uuid.to_string(),
        name: name.to_string(),
        avatar_url: Some(format!("https://avatars.test/{uuid}.png")),
    }
}

pub fn temp_store(dir: &TempDir) -> Arc<SqliteStore> {
    let db_path = dir.path().join("chat.db");
    Arc::new(SqliteStore::open(db_path.to_str().unwrap(), NAMESPACE).unwrap())
}

pub fn put_value(store: &SqliteStore, key: &str, value: &str) {
    let mut connection = store.new_connection().unwrap();
    let mut tx = SqliteTransaction::in_namespace(&mut connection, store.namespace()).unwrap();
    tx.store_value(key, value).unwrap();
    tx.commit().unwrap();
}

pub fn get_value(store: &SqliteStore, key: &str) -> Option<String> {
    let mut connection = store.new_connection().unwrap();
    let mut tx = SqliteTransaction::in_namespace(&mut connection, store.namespace()).unwrap();
    let value = tx.load_value(key).unwrap();
    tx.commit().unwrap();
    value
}
