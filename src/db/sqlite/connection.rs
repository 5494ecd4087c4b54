//! SQLite connection pool and migration management.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use super::item::SqliteItemRepository;
use super::session::SqliteSession;
use crate::db::{Database, DbError, DbResult};

/// SQLite database implementation.
///
/// Owns the process-wide connection pool. The pool is opened exactly once at
/// startup and shared for the process lifetime; pooled connections may be
/// checked out from any thread, so SQLite's same-thread affinity never
/// constrains callers. Units of work are handed out by
/// [`session`](Database::session).
pub struct SqliteDatabase {
    pool: SqlitePool,
    items: SqliteItemRepository,
}

impl SqliteDatabase {
    /// Open (or create) a database file at the given path.
    ///
    /// Failure here is fatal: the caller is expected to abort startup rather
    /// than continue without a store.
    pub async fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        Self::connect(SqlitePoolOptions::new().max_connections(5), options).await
    }

    /// Create an in-memory database (useful for testing).
    pub async fn in_memory() -> DbResult<Self> {
        let options =
            SqliteConnectOptions::from_str("sqlite::memory:").map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        // A single connection keeps every session on the same in-memory
        // store; separate connections would each see their own empty one.
        Self::connect(SqlitePoolOptions::new().max_connections(1), options).await
    }

    async fn connect(
        pool_options: SqlitePoolOptions,
        options: SqliteConnectOptions,
    ) -> DbResult<Self> {
        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self {
            pool,
            items: SqliteItemRepository,
        })
    }

    /// The underlying pool, exposed for tests and advanced operations.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl Database for SqliteDatabase {
    type Session = SqliteSession;
    type Items = SqliteItemRepository;

    fn migrate(&self) -> impl std::future::Future<Output = DbResult<()>> + Send {
        async move {
            sqlx::migrate!("./migrations")
                .run(&self.pool)
                .await
                .map_err(|e| DbError::Migration {
                    message: e.to_string(),
                })
        }
    }

    fn session(&self) -> impl std::future::Future<Output = DbResult<SqliteSession>> + Send {
        async move {
            let tx = self.pool.begin().await.map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;
            Ok(SqliteSession::new(tx))
        }
    }

    fn items(&self) -> &SqliteItemRepository {
        &self.items
    }
}
