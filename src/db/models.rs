//! Domain models for the item store.
//!
//! These models are storage-agnostic and represent the core entities
//! used throughout the application.

use serde::{Deserialize, Serialize};

/// An item as persisted in the store.
///
/// The `id` is assigned by the storage layer on insert and is never
/// supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    /// An absent description is an explicit `None` (serialized as `null`),
    /// never an empty string.
    pub description: Option<String>,
}

/// The validated field set shared by item write payloads.
///
/// `name` is always present once a payload has passed boundary validation;
/// `description` defaults to `None` per instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}
