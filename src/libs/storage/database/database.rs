use crate::libs::storage::database::storage_sqlite::{SqliteStore, SqliteTransaction};
use crate::libs::storage::storage_traits::{StoreError, Transactional};

pub(crate) fn db_migration(store: &SqliteStore) -> Result<(), StoreError> {
    let mut connection = store.new_connection()?;
    let sqlite_transaction = SqliteTransaction::new(&mut connection)?;

    // values the client keeps between launches, partitioned so a reset only
    // touches its own keys
    sqlite_transaction
        .inner()
        .execute(
            "CREATE TABLE IF NOT EXISTS local_state (
                namespace TEXT NOT NULL,
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now')),
                PRIMARY KEY (namespace, key)
            );",
            [],
        )
        .map_err(|e| StoreError::Migration(e.to_string()))?;

    sqlite_transaction
        .commit()
        .map_err(|_| StoreError::Migration("Could not commit initial db.".to_string()))?;
    Ok(())
}
