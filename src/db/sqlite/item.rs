//! SQLite ItemRepository implementation.

use std::future::Future;

use sqlx::Row;

use super::session::SqliteSession;
use crate::db::{DbError, DbResult, Item, ItemRepository, NewItem};

/// SQLx-backed item repository.
///
/// Stateless: every query runs on the connection owned by the session the
/// caller passes in, so visibility of writes is entirely the session's
/// concern.
pub struct SqliteItemRepository;

fn not_found(id: i64) -> DbError {
    DbError::NotFound {
        entity_type: "Item".to_string(),
        id,
    }
}

fn database_error(e: sqlx::Error) -> DbError {
    DbError::Database {
        message: e.to_string(),
    }
}

impl ItemRepository for SqliteItemRepository {
    type Session = SqliteSession;

    fn insert(
        &self,
        session: &mut SqliteSession,
        item: &NewItem,
    ) -> impl Future<Output = DbResult<Item>> + Send {
        async move {
            let result = sqlx::query("INSERT INTO item (name, description) VALUES (?, ?)")
                .bind(&item.name)
                .bind(&item.description)
                .execute(session.connection())
                .await
                .map_err(database_error)?;

            Ok(Item {
                id: result.last_insert_rowid(),
                name: item.name.clone(),
                description: item.description.clone(),
            })
        }
    }

    fn get(
        &self,
        session: &mut SqliteSession,
        id: i64,
    ) -> impl Future<Output = DbResult<Item>> + Send {
        async move {
            let row = sqlx::query("SELECT id, name, description FROM item WHERE id = ?")
                .bind(id)
                .fetch_optional(session.connection())
                .await
                .map_err(database_error)?;

            match row {
                Some(row) => Ok(Item {
                    id: row.get("id"),
                    name: row.get("name"),
                    description: row.get("description"),
                }),
                None => Err(not_found(id)),
            }
        }
    }

    fn list(
        &self,
        session: &mut SqliteSession,
    ) -> impl Future<Output = DbResult<Vec<Item>>> + Send {
        async move {
            let rows = sqlx::query("SELECT id, name, description FROM item ORDER BY id")
                .fetch_all(session.connection())
                .await
                .map_err(database_error)?;

            Ok(rows
                .into_iter()
                .map(|row| Item {
                    id: row.get("id"),
                    name: row.get("name"),
                    description: row.get("description"),
                })
                .collect())
        }
    }

    fn update(
        &self,
        session: &mut SqliteSession,
        id: i64,
        item: &NewItem,
    ) -> impl Future<Output = DbResult<Item>> + Send {
        async move {
            let result = sqlx::query("UPDATE item SET name = ?, description = ? WHERE id = ?")
                .bind(&item.name)
                .bind(&item.description)
                .bind(id)
                .execute(session.connection())
                .await
                .map_err(database_error)?;

            if result.rows_affected() == 0 {
                return Err(not_found(id));
            }

            Ok(Item {
                id,
                name: item.name.clone(),
                description: item.description.clone(),
            })
        }
    }

    fn delete(
        &self,
        session: &mut SqliteSession,
        id: i64,
    ) -> impl Future<Output = DbResult<()>> + Send {
        async move {
            let result = sqlx::query("DELETE FROM item WHERE id = ?")
                .bind(id)
                .execute(session.connection())
                .await
                .map_err(database_error)?;

            if result.rows_affected() == 0 {
                return Err(not_found(id));
            }

            Ok(())
        }
    }
}
