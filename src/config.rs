//! `marquee.toml`: where the movie database lives

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::storage::schema;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MarqueeConfig {
    /// Database file; relative paths resolve against the working directory
    pub database: Option<String>,
}

impl MarqueeConfig {
    /// Configured database path, ignoring a blank entry
    pub fn database_path(&self) -> Option<PathBuf> {
        self.database
            .as_deref()
            .map(str::trim)
            .filter(|db| !db.is_empty())
            .map(PathBuf::from)
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("marquee.toml")
}

pub fn default_database_path_in(base: &Path) -> PathBuf {
    base.join(".marquee").join(schema::database_file_name())
}

/// Read the config file; a missing file is not an error
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<MarqueeConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
    };

    let config = toml::from_str(&contents)
        .with_context(|| format!("invalid movie config in {}", path.display()))?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &MarqueeConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    ensure_db_dir(path)?;
    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
    tracing::debug!("Wrote config {}", path.display());
    Ok(())
}

/// Create the parent directory of a file path if it is missing
pub fn ensure_db_dir(db_path: &Path) -> std::io::Result<()> {
    match db_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            std::fs::create_dir_all(parent)
        }
        _ => Ok(()),
    }
}

/// Pick the database path: explicit flag, then config file, then the default under `base`
pub fn resolve_database_path(
    flag: Option<&Path>,
    config: Option<&MarqueeConfig>,
    base: &Path,
) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }
    config
        .and_then(MarqueeConfig::database_path)
        .unwrap_or_else(|| default_database_path_in(base))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(Some(&dir.path().join("absent.toml"))).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_invalid_config_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("marquee.toml");
        std::fs::write(&path, "database = [").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("marquee.toml"));
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join("marquee.toml");
        let config = MarqueeConfig {
            database: Some("movies/UserMovies.db".to_string()),
        };

        write_config(&path, &config, false).unwrap();
        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded.database.as_deref(), Some("movies/UserMovies.db"));

        assert!(write_config(&path, &config, false).is_err());
        write_config(&path, &MarqueeConfig::default(), true).unwrap();
        assert!(load_config(Some(&path)).unwrap().unwrap().database.is_none());
    }

    #[test]
    fn test_ensure_db_dir_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("a").join("b").join("UserMovies.db");

        ensure_db_dir(&db).unwrap();
        assert!(db.parent().unwrap().is_dir());
        assert!(!db.exists());

        // Bare file names have no directory to create
        ensure_db_dir(Path::new("UserMovies.db")).unwrap();
    }

    #[test]
    fn test_resolve_database_path_precedence() {
        let base = Path::new("/home/me");
        let config = MarqueeConfig {
            database: Some("/data/films.db".to_string()),
        };
        let blank = MarqueeConfig {
            database: Some("  ".to_string()),
        };

        assert_eq!(
            resolve_database_path(Some(Path::new("cli.db")), Some(&config), base),
            PathBuf::from("cli.db")
        );
        assert_eq!(
            resolve_database_path(None, Some(&config), base),
            PathBuf::from("/data/films.db")
        );
        assert_eq!(
            resolve_database_path(None, Some(&blank), base),
            PathBuf::from("/home/me/.marquee/UserMovies.db")
        );
        assert_eq!(
            resolve_database_path(None, None, base),
            PathBuf::from("/home/me/.marquee/UserMovies.db")
        );
    }
}
