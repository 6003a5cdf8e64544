//! Storage Layer - SQLite-backed persistence
//!
//! System of record is a single SQLite table:
//! - movies(_id, name, director, writer, actor, actress, genre, year)
//!
//! Every operation opens its own connection and closes it before returning.

pub mod schema;
pub mod sqlite;

pub use sqlite::{MovieStore, StoreStats};
