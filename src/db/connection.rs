//! SQLite pool for the food log
//!
//! Every pooled connection enforces foreign keys, so a log can never point
//! at a product that does not exist.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, OpenFlags};
use thiserror::Error;

use super::migrations;

const POOL_SIZE: u32 = 4;

const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys = ON;
     PRAGMA journal_mode = WAL;
     PRAGMA synchronous = NORMAL;
     PRAGMA temp_store = MEMORY;";

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Connection pool error: {0}")]
    Connection(#[from] r2d2::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Cannot create data directory {}: {source}", .path.display())]
    DataDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type DbResult<T> = Result<T, DbError>;

pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Shared handle to the food log database
#[derive(Clone)]
pub struct Database {
    pool: Arc<Pool<SqliteConnectionManager>>,
    path: PathBuf,
}

impl Database {
    /// Pool over the file at `path`, created if missing. The schema is left
    /// as is; see [`Database::open`].
    pub fn new(path: impl AsRef<Path>) -> DbResult<Self> {
        let path = path.as_ref();
        let manager = SqliteConnectionManager::file(path)
            .with_flags(OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE)
            .with_init(|conn| conn.execute_batch(CONNECTION_PRAGMAS));

        let pool = Pool::builder().max_size(POOL_SIZE).build(manager)?;

        Ok(Self {
            pool: Arc::new(pool),
            path: path.to_path_buf(),
        })
    }

    /// Create the data directory if needed, open the pool and bring the
    /// schema up to date.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        let path = path.as_ref();

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| DbError::DataDirectory {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let database = Self::new(path)?;
        let version = database.with_conn(|conn| {
            migrations::run_migrations(conn)?;
            migrations::get_schema_version(conn)
        })?;

        tracing::info!(path = %path.display(), version, "Food log database ready");
        Ok(database)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get_conn(&self) -> DbResult<PooledConn> {
        Ok(self.pool.get()?)
    }

    /// Run `f` on a pooled connection
    pub fn with_conn<F, T>(&self, f: F) -> DbResult<T>
    where
        F: FnOnce(&Connection) -> DbResult<T>,
    {
        let conn = self.get_conn()?;
        f(&conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_directory_and_schema() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("data").join("log.db");

        let database = Database::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(database.path(), path.as_path());

        let version = database.with_conn(migrations::get_schema_version).unwrap();
        assert_eq!(version, migrations::SCHEMA_VERSION);
    }

    #[test]
    fn test_foreign_keys_enforced() {
        let temp = TempDir::new().unwrap();
        let database = Database::open(temp.path().join("log.db")).unwrap();

        let result = database.with_conn(|conn| {
            conn.execute(
                "INSERT INTO daily_logs (product_id, quantity, log_date) VALUES (99, 100, '2025-01-09')",
                [],
            )?;
            Ok(())
        });
        assert!(matches!(result, Err(DbError::Sqlite(_))));
    }

    #[test]
    fn test_open_fails_when_directory_is_a_file() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("data");
        std::fs::write(&blocker, "not a directory").unwrap();

        let result = Database::open(blocker.join("log.db"));
        assert!(matches!(result, Err(DbError::DataDirectory { .. })));
    }
}
