use crate::libs::storage::database::database::db_migration;
use crate::libs::storage::storage_traits::{
    KeyValueStore, SessionCache, StoreError, Transactional, SESSION_ID_KEY,
};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension, Result, Transaction};

pub struct SqliteTransaction<'conn> {
    tx: Transaction<'conn>,
    namespace: String,
}

impl<'conn> SqliteTransaction<'conn> {
    pub fn new(
        conn: &'conn mut PooledConnection<SqliteConnectionManager>,
    ) -> Result<Self, StoreError> {
        Self::in_namespace(conn, "")
    }

    pub fn in_namespace(
        conn: &'conn mut PooledConnection<SqliteConnectionManager>,
        namespace: &str,
    ) -> Result<Self, StoreError> {
        let tx = conn.transaction()?;
        Ok(Self {
            tx,
            namespace: namespace.to_string(),
        })
    }

    pub fn inner(&self) -> &Transaction<'conn> {
        &self.tx
    }
}

impl Transactional for SqliteTransaction<'_> {
    fn commit(self) -> Result<(), StoreError> {
        Ok(self.tx.commit()?)
    }

    fn rollback(self) -> Result<(), StoreError> {
        Ok(self.tx.rollback()?)
    }
}

impl KeyValueStore for SqliteTransaction<'_> {
    fn load_value(&mut self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .tx
            .query_row(
                "SELECT value FROM local_state WHERE namespace = ?1 AND key = ?2",
                params![self.namespace, key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn store_value(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.tx.execute(
            "INSERT OR REPLACE INTO local_state (namespace, key, value, updated_at)
             VALUES (?1, ?2, ?3, strftime('%s', 'now'))",
            params![self.namespace, key, value],
        )?;
        Ok(())
    }

    fn clear_namespace(&mut self) -> Result<usize, StoreError> {
        let removed = self.tx.execute(
            "DELETE FROM local_state WHERE namespace = ?1",
            params![self.namespace],
        )?;
        Ok(removed)
    }
}

#[derive(Debug)]
pub struct SqliteStore {
    conn_pool: Pool<SqliteConnectionManager>,
    namespace: String,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `db_path` and runs the
    /// schema migration.
    pub fn open(db_path: &str, namespace: &str) -> Result<Self, StoreError> {
        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::new(manager)?;
        let store = Self {
            conn_pool: pool,
            namespace: namespace.to_string(),
        };
        db_migration(&store)?;
        Ok(store)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn new_connection(&self) -> Result<PooledConnection<SqliteConnectionManager>, StoreError> {
        Ok(self.conn_pool.get()?)
    }
}

impl SessionCache for SqliteStore {
    fn load_session_id(&self) -> Result<Option<String>, StoreError> {
        let mut connection = self.new_connection()?;
        let mut sqlite_transaction =
            SqliteTransaction::in_namespace(&mut connection, &self.namespace)?;
        let session_id = sqlite_transaction.load_value(SESSION_ID_KEY)?;
        sqlite_transaction.commit()?;
        Ok(session_id)
    }

    fn reset_session(&self, session_id: &str) -> Result<(), StoreError> {
        let mut connection = self.new_connection()?;
        let mut sqlite_transaction =
            SqliteTransaction::in_namespace(&mut connection, &self.namespace)?;
        let removed = sqlite_transaction.clear_namespace()?;
        sqlite_transaction.store_value(SESSION_ID_KEY, session_id)?;
        sqlite_transaction.commit()?;
        tracing::debug!(namespace = %self.namespace, removed, "cleared local state");
        Ok(())
    }
}
