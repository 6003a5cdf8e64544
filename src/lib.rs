//! # Marquee - personal movie log
//!
//! Records movies (name, director, writer, lead actor/actress, genre, year)
//! in a local single-table SQLite store.
//!
//! Marquee provides:
//! - A record store that opens a connection per operation
//! - A client façade deciding insert vs update and validating forms
//! - A background dispatcher delivering completions to a listener
//! - Terminal output helpers for the `marquee` binary

pub mod movie;
pub mod storage;
pub mod client;
pub mod config;
pub mod output;
pub mod ui;

// Re-exports for convenient access
pub use movie::{Movie, MovieForm, MovieId, MovieRecord, MovieSummary};
pub use storage::MovieStore;
pub use client::{Completion, Dispatcher, MovieClient, MovieListener, Operation};

/// Result type alias for Marquee operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Marquee operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Movie not found: {0}")]
    NotFound(MovieId),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}
