//! Repository and unit-of-work traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing the HTTP layer. Futures
//! are spelled out as `impl Future + Send` so that handlers generic over
//! [`Database`] stay usable from a multi-threaded runtime.

use std::future::Future;

use crate::db::{
    DbResult,
    models::{Item, NewItem},
};

/// A unit of work against the store, scoped to one logical operation.
///
/// Sessions never auto-commit. A caller either ends a session with
/// [`commit`](Session::commit) or [`rollback`](Session::rollback), or drops
/// it, in which case every pending write is rolled back. Sessions must not
/// be shared across concurrent units of work.
pub trait Session: Send {
    /// Commit all writes performed through this session.
    fn commit(self) -> impl Future<Output = DbResult<()>> + Send;

    /// Discard all writes performed through this session.
    ///
    /// Dropping the session has the same effect; this method only exists to
    /// make the outcome explicit at the call site.
    fn rollback(self) -> impl Future<Output = DbResult<()>> + Send;
}

/// Repository for Item operations.
///
/// Every operation executes inside a caller-supplied session, so the caller
/// decides when (and whether) the work becomes visible to other sessions.
pub trait ItemRepository: Send + Sync {
    type Session: Session;

    /// Insert a new item and return it with its store-assigned id.
    fn insert(
        &self,
        session: &mut Self::Session,
        item: &NewItem,
    ) -> impl Future<Output = DbResult<Item>> + Send;

    /// Get an item by id.
    fn get(
        &self,
        session: &mut Self::Session,
        id: i64,
    ) -> impl Future<Output = DbResult<Item>> + Send;

    /// Get all items, ordered by id.
    fn list(&self, session: &mut Self::Session) -> impl Future<Output = DbResult<Vec<Item>>> + Send;

    /// Replace the fields of an existing item.
    fn update(
        &self,
        session: &mut Self::Session,
        id: i64,
        item: &NewItem,
    ) -> impl Future<Output = DbResult<Item>> + Send;

    /// Delete an item by id.
    fn delete(
        &self,
        session: &mut Self::Session,
        id: i64,
    ) -> impl Future<Output = DbResult<()>> + Send;
}

/// Combined database interface.
///
/// Owns the process-wide connection handle and acts as the session factory.
/// The handle is constructed explicitly at startup and injected into whatever
/// needs it; there is no module-level global.
pub trait Database: Send + Sync {
    type Session: Session;
    type Items: ItemRepository<Session = Self::Session>;

    /// Run pending migrations.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Open a new independent session bound to this database.
    ///
    /// May be invoked arbitrarily many times; each call returns its own
    /// unit of work.
    fn session(&self) -> impl Future<Output = DbResult<Self::Session>> + Send;

    /// Get the item repository.
    fn items(&self) -> &Self::Items;
}
