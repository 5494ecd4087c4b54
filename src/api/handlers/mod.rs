//! HTTP request handlers and their DTOs.

mod items;
mod system;

#[cfg(test)]
mod items_test;

pub use items::*;
pub use system::*;
