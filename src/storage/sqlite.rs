//! SQLite storage implementation

use std::path::{Path, PathBuf};
use std::time::Duration;
use rusqlite::{Connection, params, OptionalExtension};
use crate::{Result, Error};
use crate::movie::{Movie, MovieId, MovieRecord, MovieSummary};
use super::schema;

/// How long a connection waits on another writer's lock before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-backed storage for movie records.
///
/// Holds only the database path. Each operation acquires its own connection
/// and drops it before returning, on success and on error alike.
#[derive(Debug, Clone)]
pub struct MovieStore {
    path: PathBuf,
}

impl MovieStore {
    /// Point a store at a database file without touching the filesystem
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Open a database file (creates it and its directory if missing)
    pub fn open(path: &Path) -> Result<Self> {
        crate::config::ensure_db_dir(path)?;
        let store = Self::new(path);
        store.create_schema_if_absent()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }

    /// Create the movies table if it does not exist and stamp the schema version.
    ///
    /// A store written by a newer schema version is left untouched.
    pub fn create_schema_if_absent(&self) -> Result<()> {
        let conn = self.connect()?;
        let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
        conn.execute(schema::CREATE_MOVIES_TABLE, [])?;

        if version == 0 {
            conn.pragma_update(None, "user_version", schema::SCHEMA_VERSION)?;
            tracing::info!("Initialized movie schema v{} at {}", schema::SCHEMA_VERSION, self.path.display());
        } else if version != schema::SCHEMA_VERSION {
            tracing::debug!("Schema version {} differs from {}, no upgrade needed", version, schema::SCHEMA_VERSION);
        }
        Ok(())
    }

    /// Schema version recorded in the database file
    pub fn schema_version(&self) -> Result<i64> {
        let conn = self.connect()?;
        let version = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
        Ok(version)
    }

    // ========== Movie Operations ==========

    /// Insert a new movie and return its assigned id
    pub fn insert(&self, movie: &Movie) -> Result<MovieId> {
        let conn = self.connect()?;
        conn.execute(
            r#"
            INSERT INTO movies (name, director, writer, actor, actress, genre, year)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                movie.name,
                movie.director,
                movie.writer,
                movie.actor,
                movie.actress,
                movie.genre,
                movie.year,
            ],
        )?;
        let id = MovieId::new(conn.last_insert_rowid());
        tracing::debug!("Inserted movie {} ({:?})", id, movie.name);
        Ok(id)
    }

    /// Overwrite every field of an existing movie
    pub fn update(&self, id: MovieId, movie: &Movie) -> Result<()> {
        let conn = self.connect()?;
        let changed = conn.execute(
            r#"
            UPDATE movies
            SET name = ?1, director = ?2, writer = ?3, actor = ?4, actress = ?5, genre = ?6, year = ?7
            WHERE _id = ?8
            "#,
            params![
                movie.name,
                movie.director,
                movie.writer,
                movie.actor,
                movie.actress,
                movie.genre,
                movie.year,
                id,
            ],
        )?;

        if changed == 0 {
            return Err(Error::NotFound(id));
        }
        tracing::debug!("Updated movie {}", id);
        Ok(())
    }

    /// Id and name of every movie, ordered by name then id
    pub fn fetch_all(&self) -> Result<Vec<MovieSummary>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT _id, name FROM movies ORDER BY name, _id")?;

        let movies = stmt
            .query_map([], |row| {
                Ok(MovieSummary {
                    id: row.get(0)?,
                    name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(movies)
    }

    /// Full row for a movie id
    pub fn fetch_one(&self, id: MovieId) -> Result<MovieRecord> {
        let conn = self.connect()?;
        let sql = format!("SELECT {} FROM movies WHERE _id = ?1", schema::MOVIE_COLUMNS);

        conn.query_row(&sql, [id], row_to_record)
            .optional()?
            .ok_or(Error::NotFound(id))
    }

    /// Delete a movie. Returns whether a row was removed; a missing id is not an error.
    pub fn delete(&self, id: MovieId) -> Result<bool> {
        let conn = self.connect()?;
        let removed = conn.execute("DELETE FROM movies WHERE _id = ?1", [id])?;
        if removed == 0 {
            tracing::debug!("Delete of movie {} matched no row", id);
        } else {
            tracing::debug!("Deleted movie {}", id);
        }
        Ok(removed > 0)
    }

    /// Count all movies
    pub fn count(&self) -> Result<usize> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM movies", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<StoreStats> {
        Ok(StoreStats {
            path: self.path.clone(),
            schema_version: self.schema_version()?,
            movies: self.count()?,
        })
    }
}

/// Helper to convert a row to a MovieRecord. NULL columns read as empty text.
fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<MovieRecord> {
    let text = |idx: usize| -> rusqlite::Result<String> {
        Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
    };

    Ok(MovieRecord {
        id: row.get(0)?,
        movie: Movie {
            name: text(1)?,
            director: text(2)?,
            writer: text(3)?,
            actor: text(4)?,
            actress: text(5)?,
            genre: text(6)?,
            year: text(7)?,
        },
    })
}

/// Database statistics
#[derive(Debug, Clone, serde::Serialize)]
pub struct StoreStats {
    pub path: PathBuf,
    pub schema_version: i64,
    pub movies: usize,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Path: {}", self.path.display())?;
        writeln!(f, "  Schema version: {}", self.schema_version)?;
        writeln!(f, "  Movies: {}", self.movies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, MovieStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = MovieStore::open(&dir.path().join(schema::database_file_name())).unwrap();
        (dir, store)
    }

    fn inception() -> Movie {
        Movie::named("Inception").with_director("Nolan").with_year("2010")
    }

    #[test]
    fn test_schema_creation_is_idempotent() {
        let (_dir, store) = temp_store();
        store.insert(&Movie::named("Heat")).unwrap();

        store.create_schema_if_absent().unwrap();
        store.create_schema_if_absent().unwrap();

        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(store.schema_version().unwrap(), schema::SCHEMA_VERSION);
    }

    #[test]
    fn test_open_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("UserMovies.db");
        let store = MovieStore::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_newer_schema_version_is_left_alone() {
        let (_dir, store) = temp_store();
        {
            let conn = Connection::open(store.path()).unwrap();
            conn.pragma_update(None, "user_version", 2).unwrap();
        }
        store.create_schema_if_absent().unwrap();
        assert_eq!(store.schema_version().unwrap(), 2);
    }

    #[test]
    fn test_movie_crud() {
        let (_dir, store) = temp_store();

        let id = store.insert(&inception()).unwrap();
        assert_eq!(id, MovieId::new(1));

        let record = store.fetch_one(id).unwrap();
        assert_eq!(record.id, id);
        assert_eq!(record.movie, inception());
        assert_eq!(record.movie.writer, "");
        assert_eq!(record.movie.genre, "");

        store.update(id, &inception().with_genre("Sci-Fi")).unwrap();
        assert_eq!(store.fetch_one(id).unwrap().movie.genre, "Sci-Fi");

        assert!(store.delete(id).unwrap());
        assert!(store.fetch_one(id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_ids_increase_and_are_not_reused() {
        let (_dir, store) = temp_store();
        let first = store.insert(&Movie::named("A")).unwrap();
        let second = store.insert(&Movie::named("B")).unwrap();
        assert!(second > first);

        store.delete(second).unwrap();
        let third = store.insert(&Movie::named("C")).unwrap();
        assert!(third > second);
    }

    #[test]
    fn test_fetch_all_orders_by_name() {
        let (_dir, store) = temp_store();
        store.insert(&Movie::named("Zeta")).unwrap();
        store.insert(&Movie::named("Alpha")).unwrap();
        store.insert(&Movie::named("Midway")).unwrap();

        let names: Vec<String> = store.fetch_all().unwrap().into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["Alpha", "Midway", "Zeta"]);
    }

    #[test]
    fn test_duplicate_names_list_in_id_order() {
        let (_dir, store) = temp_store();
        let first = store.insert(&Movie::named("Solaris").with_year("1972")).unwrap();
        store.insert(&Movie::named("Alpha")).unwrap();
        let second = store.insert(&Movie::named("Solaris").with_year("2002")).unwrap();

        let ids: Vec<MovieId> = store
            .fetch_all()
            .unwrap()
            .into_iter()
            .filter(|m| m.name == "Solaris")
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[test]
    fn test_concurrent_stores_on_one_file() {
        let (_dir, store) = temp_store();
        let path = store.path().to_path_buf();

        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let path = path.clone();
                std::thread::spawn(move || -> Result<()> {
                    let store = MovieStore::new(path);
                    for i in 0..50 {
                        let id = store.insert(&Movie::named(format!("w{worker}-{i}")))?;
                        store.update(id, &Movie::named(format!("w{worker}-{i}")).with_genre("Drama"))?;
                        store.fetch_all()?;
                    }
                    Ok(())
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap().unwrap();
        }
        assert_eq!(store.count().unwrap(), 200);
    }

    #[test]
    fn test_update_missing_id_is_not_found() {
        let (_dir, store) = temp_store();
        let err = store.update(MovieId::new(42), &Movie::named("Ghost")).unwrap_err();
        assert!(matches!(err, Error::NotFound(id) if id == MovieId::new(42)));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_delete_missing_id_is_noop() {
        let (_dir, store) = temp_store();
        store.insert(&Movie::named("Keep")).unwrap();
        assert!(!store.delete(MovieId::new(99)).unwrap());
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_null_columns_read_as_empty() {
        let (_dir, store) = temp_store();
        {
            let conn = Connection::open(store.path()).unwrap();
            conn.execute("INSERT INTO movies (name) VALUES ('Raw')", []).unwrap();
        }
        let record = store.fetch_one(MovieId::new(1)).unwrap();
        assert_eq!(record.movie, Movie::named("Raw"));
    }

    #[test]
    fn test_unopenable_path_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a database file
        let store = MovieStore::new(dir.path());
        let err = store.insert(&Movie::named("Nowhere")).unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
    }

    #[test]
    fn test_stats() {
        let (_dir, store) = temp_store();
        store.insert(&Movie::named("One")).unwrap();
        store.insert(&Movie::named("Two")).unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.movies, 2);
        assert_eq!(stats.schema_version, 1);
        assert!(stats.to_string().contains("Movies: 2"));
    }
}
