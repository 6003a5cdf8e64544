//! Client façade
//!
//! The contract a presentation layer uses: load the list, load one movie
//! for editing, save a form, remove a movie. `MovieClient` runs these
//! synchronously; `Dispatcher` runs them on a background worker and hands
//! completions back to a `MovieListener`.

pub mod dispatcher;
pub mod listener;

pub use dispatcher::{Completion, Dispatcher};
pub use listener::{MovieListener, Operation};

use crate::movie::{MovieForm, MovieId, MovieSummary};
use crate::storage::MovieStore;
use crate::{Error, Result};

/// Mediates between movie forms and the record store
#[derive(Debug, Clone)]
pub struct MovieClient {
    store: MovieStore,
}

impl MovieClient {
    pub fn new(store: MovieStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &MovieStore {
        &self.store
    }

    /// Reject forms whose name is blank after trimming
    pub fn validate(form: &MovieForm) -> Result<()> {
        if !form.movie.has_name() {
            return Err(Error::Validation("movie name must not be empty".to_string()));
        }
        Ok(())
    }

    /// Insert a new movie or overwrite an existing one.
    ///
    /// A form without an id is inserted and gets a fresh id. A form with an
    /// id overwrites all seven fields of that row and keeps its id.
    pub fn save(&self, form: &MovieForm) -> Result<MovieId> {
        Self::validate(form)?;

        match form.id {
            None => self.store.insert(&form.movie),
            Some(id) => {
                self.store.update(id, &form.movie)?;
                Ok(id)
            }
        }
    }

    pub fn load_for_list(&self) -> Result<Vec<MovieSummary>> {
        self.store.fetch_all()
    }

    pub fn load_for_edit(&self, id: MovieId) -> Result<MovieForm> {
        self.store.fetch_one(id).map(MovieForm::from)
    }

    /// Delete a movie; removing an id that no longer exists is a no-op
    pub fn remove(&self, id: MovieId) -> Result<()> {
        self.store.delete(id)?;
        Ok(())
    }
}
