//! SQLite unit of work.

use std::future::Future;

use sqlx::{Sqlite, SqliteConnection, Transaction};

use crate::db::{DbError, DbResult, Session};

/// A session backed by a SQLite transaction.
///
/// Nothing written through a session is visible to other sessions until
/// [`commit`](Session::commit) is called. If the session is dropped without
/// an explicit commit, the transaction rolls back, so a session abandoned on
/// an error path cannot leak half-finished writes.
pub struct SqliteSession {
    tx: Transaction<'static, Sqlite>,
}

impl SqliteSession {
    pub(crate) fn new(tx: Transaction<'static, Sqlite>) -> Self {
        Self { tx }
    }

    /// The connection this session's transaction runs on.
    pub(crate) fn connection(&mut self) -> &mut SqliteConnection {
        &mut self.tx
    }
}

impl Session for SqliteSession {
    fn commit(self) -> impl Future<Output = DbResult<()>> + Send {
        async move {
            self.tx.commit().await.map_err(|e| DbError::Database {
                message: e.to_string(),
            })
        }
    }

    fn rollback(self) -> impl Future<Output = DbResult<()>> + Send {
        async move {
            self.tx.rollback().await.map_err(|e| DbError::Database {
                message: e.to_string(),
            })
        }
    }
}
