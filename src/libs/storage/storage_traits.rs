use thiserror::Error;

pub const SESSION_ID_KEY: &str = "sessionId";

pub trait Transactional {
    fn commit(self) -> Result<(), StoreError>;
    fn rollback(self) -> Result<(), StoreError>;
}

/// Key/value access scoped to one namespace of the local state table.
pub trait KeyValueStore {
    fn load_value(&mut self, key: &str) -> Result<Option<String>, StoreError>;
    fn store_value(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn clear_namespace(&mut self) -> Result<usize, StoreError>;
}

/// What the session bootstrapper needs from local storage. Implementations
/// open their own transactions, so callers only hold a shared reference.
pub trait SessionCache: Send + Sync {
    fn load_session_id(&self) -> Result<Option<String>, StoreError>;

    /// Clears every key of the namespace and stores `session_id` as the only
    /// remaining value.
    fn reset_session(&self, session_id: &str) -> Result<(), StoreError>;
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Sqlite Error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("ConnectionPool Error: {0}")]
    ConnectionPool(#[from] r2d2::Error),
    #[error("Migration Error: {0}")]
    Migration(String),
}
