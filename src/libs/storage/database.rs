pub mod database;
pub mod storage_sqlite;
