// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, error, info};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

use trivia::api::{ImportRequest, PlayRequest};
use trivia::app_config::{Config, LogLevel};
use trivia::database::DatabaseConnection;
use trivia::{
    Controller, Difficulty, ErrorResponse, NewQuestion, PageRequest, QuestionUpdate, QuizResult,
};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List all categories as an id → type map
    Categories,

    /// Show a single category
    Category {
        id: i64,
    },

    /// List one page of all questions
    Questions {
        /// Page number (1-based)
        #[arg(short, long, allow_negative_numbers = true)]
        page: Option<i64>,
    },

    /// Show a single question
    Question {
        id: i64,
    },

    /// List one page of the questions in a category
    CategoryQuestions {
        id: i64,

        /// Page number (1-based)
        #[arg(short, long, allow_negative_numbers = true)]
        page: Option<i64>,
    },

    /// Search question text, ignoring case
    Search {
        /// Text to look for; empty matches every question
        #[arg(default_value = "")]
        term: String,

        /// Page number (1-based)
        #[arg(short, long, allow_negative_numbers = true)]
        page: Option<i64>,
    },

    /// Create a question
    Add {
        #[arg(short, long)]
        question: String,

        #[arg(short, long)]
        answer: String,

        #[arg(short, long)]
        category: i64,

        /// Difficulty from 1 to 5
        #[arg(short, long)]
        difficulty: i64,

        /// Page of the refreshed listing to return
        #[arg(short, long, allow_negative_numbers = true)]
        page: Option<i64>,
    },

    /// Change fields of an existing question
    Update {
        id: i64,

        #[arg(short, long)]
        question: Option<String>,

        #[arg(short, long)]
        answer: Option<String>,

        #[arg(short, long)]
        category: Option<i64>,

        /// Difficulty from 1 to 5
        #[arg(short, long)]
        difficulty: Option<i64>,
    },

    /// Delete a question
    Delete {
        id: i64,

        /// Page of the refreshed listing to return
        #[arg(short, long, allow_negative_numbers = true)]
        page: Option<i64>,
    },

    /// Draw the next unseen quiz question
    Play {
        /// Category to draw from; 0 draws from every category
        #[arg(short, long, default_value_t = 0)]
        category: i64,

        /// Question ids already served, comma separated
        #[arg(long, value_delimiter = ',')]
        previous: Vec<i64>,
    },

    /// Create a category
    AddCategory {
        /// Display label of the category
        kind: String,
    },

    /// Load categories and questions from a JSON file
    Import {
        file: PathBuf,
    },

    /// Show record counts and the database file size
    Stats,

    /// Generate shell completions for trivia
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Trivia - quiz content engine
///
/// Stores trivia questions by category and serves pages, searches and
/// random quiz draws. Every command prints its JSON response on stdout.
#[derive(Parser, Debug)]
#[command(name = "trivia")]
#[command(version)]
#[command(about = "Trivia question store and quiz engine")]
#[command(long_about = "Stores trivia questions by category and serves pages, searches and random quiz draws.

EXAMPLES:
    trivia categories                          # List categories
    trivia questions --page 2                  # Second page of questions
    trivia search title                        # Questions mentioning 'title'
    trivia play --category 3 --previous 5,9    # Next unseen question in category 3
    trivia add -q 'Capital of Peru?' -a Lima -c 3 -d 2
    trivia import questions.json               # Bulk load categories and questions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Database file (overrides the config file); ':memory:' for a throwaway database
    #[arg(long, global = true, env = "TRIVIA_DATABASE")]
    database: Option<PathBuf>,

    /// Seed for the quiz draw (overrides the config file)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Trace is the ceiling; the effective level is set once config is loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "trivia", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;
    log::set_max_level(config.log_level.to_level_filter());
    debug!("Loaded configuration: {:?}", config);

    if let Commands::Stats = &cli.command {
        let db = DatabaseConnection::new(config.database.resolve_path()?)?;
        let stats = db.stats()?;
        info!("{}", stats);
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    let controller = Controller::with_config(config)?;
    run_command(&controller, cli.command).await
}

/// Load the config file and apply command line overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load_or_create(&cli.config_path)?;

    if let Some(database) = &cli.database {
        config.database.path = Some(database.clone());
    }
    if let Some(seed) = cli.seed {
        config.quiz.random_seed = Some(seed);
    }
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

async fn run_command(controller: &Controller, command: Commands) -> Result<()> {
    match command {
        Commands::Categories => emit(controller.categories().await),
        Commands::Category { id } => emit(controller.category(id).await),
        Commands::Questions { page } => {
            emit(controller.list_questions(PageRequest::or_first(page)).await)
        }
        Commands::Question { id } => emit(controller.question(id).await),
        Commands::CategoryQuestions { id, page } => emit(
            controller
                .questions_by_category(id, PageRequest::or_first(page))
                .await,
        ),
        Commands::Search { term, page } => emit(
            controller
                .search_questions(&term, PageRequest::or_first(page))
                .await,
        ),
        Commands::Add {
            question,
            answer,
            category,
            difficulty,
            page,
        } => {
            let result = match Difficulty::new(difficulty) {
                Ok(difficulty) => {
                    let new_question = NewQuestion::new(question, answer, category, difficulty);
                    controller
                        .create_question(&new_question, PageRequest::or_first(page))
                        .await
                }
                Err(e) => Err(e),
            };
            emit(result)
        }
        Commands::Update {
            id,
            question,
            answer,
            category,
            difficulty,
        } => {
            let result = match difficulty.map(Difficulty::new).transpose() {
                Ok(difficulty) => {
                    let update = QuestionUpdate {
                        question,
                        answer,
                        category,
                        difficulty,
                    };
                    controller.update_question(id, &update).await
                }
                Err(e) => Err(e),
            };
            emit(result)
        }
        Commands::Delete { id, page } => emit(
            controller
                .delete_question(id, PageRequest::or_first(page))
                .await,
        ),
        Commands::Play { category, previous } => {
            emit(controller.play(&PlayRequest::new(category, previous)).await)
        }
        Commands::AddCategory { kind } => emit(controller.create_category(&kind).await),
        Commands::Import { file } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read import file: {:?}", file))?;
            let request: ImportRequest = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse import file: {:?}", file))?;
            emit(controller.import(request).await)
        }
        Commands::Stats | Commands::Completions { .. } => Ok(()),
    }
}

/// Print a response envelope, or the error envelope on failure
fn emit<T: Serialize>(result: QuizResult<T>) -> Result<()> {
    match result {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Err(e) => {
            error!("{}", e);
            println!("{}", serde_json::to_string_pretty(&ErrorResponse::from(&e))?);
            Err(anyhow!(e))
        }
    }
}
