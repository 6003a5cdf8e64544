//! Marquee CLI - keep a personal log of movies

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use marquee::config;
use marquee::output::{emit_error, OutputMode};
use marquee::MovieId;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{App, FieldArgs};

#[derive(Parser)]
#[command(name = "marquee")]
#[command(version)]
#[command(about = "Personal movie log backed by a local SQLite store")]
#[command(long_about = r#"
Marquee keeps a list of movies you have watched or want to watch:
  • name, director, writer, lead actor and actress, genre, year
  • stored in a single local SQLite file (UserMovies.db)

Example usage:
  marquee add --name "Inception" --director "Nolan" --year 2010
  marquee list
  marquee edit 1 --genre "Sci-Fi"
  marquee delete 1
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit machine-readable JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Path to the database file (overrides the config file)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a config file and create the database
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Add a new movie
    Add {
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Edit an existing movie; given fields replace stored values
    Edit {
        /// Movie ID
        id: MovieId,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Show every field of one movie
    Show {
        /// Movie ID
        id: MovieId,
    },

    /// List all movies by name
    List,

    /// Delete a movie
    Delete {
        /// Movie ID
        id: MovieId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show statistics about the movie database
    Stats,

    /// Print the version
    Version,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Init { .. } => "init",
            Commands::Add { .. } => "add",
            Commands::Edit { .. } => "edit",
            Commands::Show { .. } => "show",
            Commands::List => "list",
            Commands::Delete { .. } => "delete",
            Commands::Stats => "stats",
            Commands::Version => "version",
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging; stderr keeps JSON output on stdout clean
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let output_mode = OutputMode::from_flag(cli.json);
    let command_name = cli.command.name();

    if let Err(e) = run(cli, output_mode) {
        tracing::debug!("{} failed: {:?}", command_name, e);
        emit_error(output_mode, command_name, &format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: Cli, output_mode: OutputMode) -> anyhow::Result<()> {
    if let Commands::Version = cli.command {
        return commands::run_version(output_mode);
    }

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let loaded = config::load_config(Some(&config_path))?;
    let base = std::env::current_dir()?;
    let database = config::resolve_database_path(cli.database.as_deref(), loaded.as_ref(), &base);
    tracing::debug!("Using database {}", database.display());

    let app = App { database, output_mode };

    match cli.command {
        Commands::Init { force } => commands::run_init(&app, &config_path, force),
        Commands::Add { fields } => commands::run_add(&app, fields),
        Commands::Edit { id, fields } => commands::run_edit(&app, id, fields),
        Commands::Show { id } => commands::run_show(&app, id),
        Commands::List => commands::run_list(&app),
        Commands::Delete { id, yes } => commands::run_delete(&app, id, yes),
        Commands::Stats => commands::run_stats(&app),
        Commands::Version => commands::run_version(output_mode),
    }
}
