//! Completion callbacks from the client façade to a presentation layer

use crate::movie::{MovieForm, MovieId};
use crate::Error;
use std::fmt;

/// A background unit of work, named for failure reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Save,
    Load,
    Remove,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Save => "save",
            Operation::Load => "load",
            Operation::Remove => "remove",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives the outcome of background units.
///
/// Callbacks run on the thread that drains the dispatcher, never on the
/// worker, so implementations may touch presentation state directly.
pub trait MovieListener {
    /// A save finished; carries the new or unchanged id
    fn on_save_completed(&mut self, id: MovieId);

    /// A delete finished
    fn on_delete_completed(&mut self);

    /// A detail load finished
    fn on_load_completed(&mut self, form: MovieForm);

    /// A unit failed in the store
    fn on_failed(&mut self, operation: Operation, error: Error) {
        if super::dispatcher::failure_level(&error) == tracing::Level::WARN {
            tracing::warn!("Movie {} failed: {}", operation, error);
        } else {
            tracing::debug!("Movie {} failed: {}", operation, error);
        }
    }
}
