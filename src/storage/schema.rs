//! Database schema definitions

/// Logical name of the movie database
pub const DATABASE_NAME: &str = "UserMovies";

/// Current schema version, stored in `PRAGMA user_version`
pub const SCHEMA_VERSION: i64 = 1;

/// SQL to create the movies table
pub const CREATE_MOVIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS movies (
    _id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT,
    director TEXT,
    writer TEXT,
    actor TEXT,
    actress TEXT,
    genre TEXT,
    year TEXT
)
"#;

/// Columns of a full movie row, in select order
pub const MOVIE_COLUMNS: &str = "_id, name, director, writer, actor, actress, genre, year";

/// File name of the database for the logical name
pub fn database_file_name() -> String {
    format!("{}.db", DATABASE_NAME)
}
