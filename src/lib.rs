/*!
 * # Trivia - quiz content engine
 *
 * A Rust library for storing trivia questions by category and serving them
 * to quiz clients.
 *
 * ## Features
 *
 * - Paginated question listings with a configurable page size
 * - Case-insensitive substring search over question text
 * - Random draw of the next unseen question for a quiz session, scoped to
 *   one category or to all of them
 * - Create, update and delete questions with typed, validated requests
 * - SQLite persistence, plus an in-memory store for tests
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `quiz`: Pure retrieval and selection engine:
 *   - `quiz::paginator`: Fixed-size page windows
 *   - `quiz::search`: Text search predicate
 *   - `quiz::selector`: Random unseen-question draw
 * - `store`: The `QuestionStore` trait and the in-memory store
 * - `database`: SQLite schema, connection and repository
 * - `app_controller`: Runs each operation and shapes the response
 * - `api`: Request and response envelopes
 * - `app_config`: Configuration management
 * - `errors`: Error taxonomy for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod api;
pub mod app_config;
pub mod app_controller;
pub mod database;
pub mod errors;
pub mod quiz;
pub mod store;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use database::models::{
    Category, CategoryId, Difficulty, FormattedQuestion, NewQuestion, Question, QuestionId,
    QuestionUpdate,
};
pub use errors::{ErrorResponse, QuizError, QuizResult};
pub use quiz::{CategoryScope, DEFAULT_PAGE_SIZE, PageRequest, RandomSource};
pub use store::{MemoryStore, QuestionStore};
