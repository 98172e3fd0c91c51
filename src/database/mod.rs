/*!
 * Database module for persistent storage of questions and categories.
 *
 * This module provides SQLite-based persistence for:
 * - Trivia questions with their answer, category and difficulty
 * - Question categories
 */

pub mod schema;
pub mod connection;
pub mod repository;
pub mod models;

// Re-export main types
pub use connection::DatabaseConnection;
pub use repository::Repository;
