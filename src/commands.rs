use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use clap::Args;
use marquee::output::{emit_success, OutputMode};
use marquee::ui::{self, Icons, Spinner};
use marquee::{
    config, Dispatcher, Error, Movie, MovieClient, MovieForm, MovieId, MovieListener,
    MovieRecord, MovieStore, Operation,
};
use owo_colors::OwoColorize;

/// How long the CLI waits for one background unit before giving up
const UNIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Field flags shared by `add` and `edit`. An empty value clears the field.
#[derive(Args, Debug, Default)]
pub struct FieldArgs {
    /// Movie name (required)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Director
    #[arg(short, long)]
    pub director: Option<String>,

    /// Writer
    #[arg(short, long)]
    pub writer: Option<String>,

    /// Lead actor
    #[arg(long)]
    pub actor: Option<String>,

    /// Lead actress
    #[arg(long)]
    pub actress: Option<String>,

    /// Genre
    #[arg(short, long)]
    pub genre: Option<String>,

    /// Release year
    #[arg(short, long)]
    pub year: Option<String>,
}

impl FieldArgs {
    /// Overwrite the fields that were given on the command line
    pub fn apply(self, mut movie: Movie) -> Movie {
        let overrides = [
            (self.name, &mut movie.name),
            (self.director, &mut movie.director),
            (self.writer, &mut movie.writer),
            (self.actor, &mut movie.actor),
            (self.actress, &mut movie.actress),
            (self.genre, &mut movie.genre),
            (self.year, &mut movie.year),
        ];
        for (value, field) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }
        movie
    }
}

/// Resolved runtime context for one command
pub struct App {
    pub database: PathBuf,
    pub output_mode: OutputMode,
}

impl App {
    fn store(&self) -> anyhow::Result<MovieStore> {
        Ok(MovieStore::open(&self.database)?)
    }

    fn session(&self) -> anyhow::Result<Session> {
        Session::start(MovieClient::new(self.store()?))
    }
}

#[derive(Default)]
struct Outcome {
    saved: Option<MovieId>,
    deleted: bool,
    loaded: Option<MovieForm>,
    failure: Option<(Operation, Error)>,
}

/// Listener that records the completion so the command can report it
struct CliListener {
    outcome: Rc<RefCell<Outcome>>,
}

impl MovieListener for CliListener {
    fn on_save_completed(&mut self, id: MovieId) {
        self.outcome.borrow_mut().saved = Some(id);
    }

    fn on_delete_completed(&mut self) {
        self.outcome.borrow_mut().deleted = true;
    }

    fn on_load_completed(&mut self, form: MovieForm) {
        self.outcome.borrow_mut().loaded = Some(form);
    }

    fn on_failed(&mut self, operation: Operation, error: Error) {
        tracing::debug!("{} failed: {}", operation, error);
        self.outcome.borrow_mut().failure = Some((operation, error));
    }
}

/// A dispatcher plus the outcome its listener fills in
struct Session {
    dispatcher: Dispatcher,
    outcome: Rc<RefCell<Outcome>>,
}

impl Session {
    fn start(client: MovieClient) -> anyhow::Result<Self> {
        let outcome = Rc::new(RefCell::new(Outcome::default()));
        let listener = CliListener { outcome: outcome.clone() };
        let dispatcher = Dispatcher::new(client, Some(Box::new(listener)))?;
        Ok(Self { dispatcher, outcome })
    }

    /// Wait for the queued unit with a spinner, then hand back what the listener saw
    fn finish(&mut self, message: &str) -> anyhow::Result<Outcome> {
        let spinner = Spinner::new(message);
        let done = self.dispatcher.wait_idle(UNIT_TIMEOUT);
        spinner.finish();

        if !done {
            anyhow::bail!("timed out waiting for the movie store");
        }
        let mut outcome = self.outcome.take();
        if let Some((_, error)) = outcome.failure.take() {
            return Err(error.into());
        }
        Ok(outcome)
    }

    fn save(&mut self, form: MovieForm) -> anyhow::Result<MovieId> {
        self.dispatcher.submit_save(form)?;
        self.finish("Saving movie")?
            .saved
            .ok_or_else(|| anyhow::anyhow!("save finished without an id"))
    }

    fn load(&mut self, id: MovieId) -> anyhow::Result<MovieForm> {
        self.dispatcher.submit_load(id)?;
        self.finish("Loading movie")?
            .loaded
            .ok_or_else(|| anyhow::anyhow!("load finished without a movie"))
    }

    fn remove(&mut self, id: MovieId) -> anyhow::Result<()> {
        self.dispatcher.submit_remove(id)?;
        let outcome = self.finish("Deleting movie")?;
        if !outcome.deleted {
            anyhow::bail!("delete finished without confirmation");
        }
        Ok(())
    }
}

pub fn run_init(app: &App, config_path: &Path, force: bool) -> anyhow::Result<()> {
    let cfg = config::MarqueeConfig {
        database: Some(app.database.display().to_string()),
    };
    config::write_config(config_path, &cfg, force)?;
    let store = app.store()?;
    let stats = store.stats()?;

    if app.output_mode.is_human() {
        ui::success("Movie library ready");
        ui::info("Config", &config_path.display().to_string());
        ui::status(Icons::DATABASE, "Database", &stats.path.display().to_string());
        ui::summary_row("Schema version", &stats.schema_version.to_string());
        ui::status(Icons::STATS, "Movies", &stats.movies.to_string());
    } else {
        emit_success(app.output_mode, "init", serde_json::json!({
            "config": config_path.display().to_string(),
            "database": stats.path.display().to_string(),
            "schema_version": stats.schema_version,
        }))?;
    }
    Ok(())
}

pub fn run_add(app: &App, fields: FieldArgs) -> anyhow::Result<()> {
    let form = MovieForm::new(fields.apply(Movie::default()));
    let mut session = app.session()?;
    let id = session.save(form)?;

    if app.output_mode.is_human() {
        ui::movie_saved(id, true);
    } else {
        emit_success(app.output_mode, "add", serde_json::json!({ "id": id }))?;
    }
    Ok(())
}

pub fn run_edit(app: &App, id: MovieId, fields: FieldArgs) -> anyhow::Result<()> {
    let mut session = app.session()?;
    let mut form = session.load(id)?;
    form.movie = fields.apply(form.movie);
    let saved = session.save(form)?;

    if app.output_mode.is_human() {
        ui::movie_saved(saved, false);
    } else {
        emit_success(app.output_mode, "edit", serde_json::json!({ "id": saved }))?;
    }
    Ok(())
}

pub fn run_show(app: &App, id: MovieId) -> anyhow::Result<()> {
    let mut session = app.session()?;
    let form = session.load(id)?;

    if app.output_mode.is_human() {
        let record = MovieRecord { id, movie: form.movie };
        ui::header(&record.movie.name);
        println!("{}", ui::detail_table(&record));
    } else {
        emit_success(app.output_mode, "show", &form)?;
    }
    Ok(())
}

pub fn run_list(app: &App) -> anyhow::Result<()> {
    let client = MovieClient::new(app.store()?);
    let movies = client.load_for_list()?;

    if !app.output_mode.is_human() {
        return emit_success(app.output_mode, "list", &movies);
    }

    if movies.is_empty() {
        println!("{} {}", Icons::EMPTY, ui::muted("No movies yet. Add one with `marquee add --name ...`"));
    } else {
        ui::header(&format!("{} movies", movies.len()));
        println!("{}", ui::movie_table(&movies));
    }
    Ok(())
}

pub fn run_delete(app: &App, id: MovieId, yes: bool) -> anyhow::Result<()> {
    let mut session = app.session()?;

    // Only the prompt needs the movie; an unconfirmed delete of a missing id is a no-op
    if !yes {
        let term = console::Term::stdout();
        if !app.output_mode.is_human() || !term.is_term() {
            anyhow::bail!("refusing to delete without confirmation (use --yes)");
        }
        let form = session.load(id)?;
        term.write_str(&format!(
            "{} Delete \"{}\"? This cannot be undone. [y/N] ",
            Icons::WARN,
            form.movie.name.bold()
        ))?;
        let answer = term.read_line()?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            ui::warn("Delete cancelled");
            return Ok(());
        }
    }

    session.remove(id)?;

    if app.output_mode.is_human() {
        ui::movie_deleted(id);
    } else {
        emit_success(app.output_mode, "delete", serde_json::json!({ "id": id }))?;
    }
    Ok(())
}

pub fn run_stats(app: &App) -> anyhow::Result<()> {
    let stats = app.store()?.stats()?;

    if app.output_mode.is_human() {
        ui::header("Marquee Statistics");
        let path = stats.path.display().to_string();
        let version = stats.schema_version.to_string();
        let movies = stats.movies.to_string();
        println!("{}", ui::stats_table(&[
            ("Database", path.as_str()),
            ("Schema version", version.as_str()),
            ("Movies", movies.as_str()),
        ]));
    } else {
        emit_success(app.output_mode, "stats", &stats)?;
    }
    Ok(())
}

pub fn run_version(output_mode: OutputMode) -> anyhow::Result<()> {
    if output_mode.is_human() {
        println!(
            "{} {} {}",
            Icons::CLAPPER,
            ui::theme().paint(ui::Role::Title, "Marquee"),
            ui::dim(&format!("v{}", env!("CARGO_PKG_VERSION")))
        );
    } else {
        emit_success(output_mode, "version", serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
        }))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_args_override_only_given_fields() {
        let movie = Movie::named("Heat").with_director("Mann").with_year("1995");
        let args = FieldArgs {
            genre: Some("Crime".to_string()),
            year: Some(String::new()),
            ..FieldArgs::default()
        };

        let updated = args.apply(movie);
        assert_eq!(updated.name, "Heat");
        assert_eq!(updated.director, "Mann");
        assert_eq!(updated.genre, "Crime");
        assert_eq!(updated.year, "");
    }

    #[test]
    fn test_session_add_then_edit() {
        let dir = tempfile::tempdir().unwrap();
        let app = App {
            database: dir.path().join("UserMovies.db"),
            output_mode: OutputMode::Json,
        };

        let mut session = app.session().unwrap();
        let id = session.save(MovieForm::new(Movie::named("Heat"))).unwrap();
        let mut form = session.load(id).unwrap();
        form.movie.genre = "Crime".to_string();
        assert_eq!(session.save(form).unwrap(), id);

        let loaded = session.load(id).unwrap();
        assert_eq!(loaded.movie.genre, "Crime");

        session.remove(id).unwrap();
        let err = session.load(id).unwrap_err();
        assert!(err.downcast_ref::<Error>().is_some_and(Error::is_not_found));
    }

    #[test]
    fn test_removing_missing_id_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let app = App {
            database: dir.path().join("UserMovies.db"),
            output_mode: OutputMode::Json,
        };

        let mut session = app.session().unwrap();
        session.remove(MovieId::new(99)).unwrap();
        drop(session);

        run_delete(&app, MovieId::new(99), true).unwrap();
        assert_eq!(app.store().unwrap().count().unwrap(), 0);
    }

    #[test]
    fn test_delete_without_confirmation_is_refused_in_json_mode() {
        let dir = tempfile::tempdir().unwrap();
        let app = App {
            database: dir.path().join("UserMovies.db"),
            output_mode: OutputMode::Json,
        };
        let id = app.store().unwrap().insert(&Movie::named("Keep")).unwrap();

        assert!(run_delete(&app, id, false).is_err());
        assert_eq!(app.store().unwrap().count().unwrap(), 1);
    }
}
