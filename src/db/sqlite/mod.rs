//! SQLite implementation of the database traits.
//!
//! This module provides a SQLite-backed implementation of the repository
//! and unit-of-work traits defined in the parent module.

mod connection;
mod item;
mod session;


pub use connection::SqliteDatabase;
pub use item::SqliteItemRepository;
pub use session::SqliteSession;
