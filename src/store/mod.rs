/*!
 * Question store abstraction.
 *
 * The controller reads and mutates questions only through this trait, so
 * the SQLite repository and the in-memory store are interchangeable:
 * - `database::Repository`: durable SQLite storage
 * - `store::memory::MemoryStore`: process-local storage for tests and demos
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::database::models::{
    Category, CategoryId, NewQuestion, Question, QuestionFilter, QuestionId, QuestionUpdate,
    validate_category_kind,
};
use crate::errors::QuizResult;

pub mod memory;

pub use memory::MemoryStore;

/// Persistence capability for question and category records
///
/// Scans are always ordered by ascending id. Implementations report
/// failures with `QuizError` and never reinterpret an empty scan as an
/// error.
#[async_trait]
pub trait QuestionStore: Send + Sync + Debug {
    /// Ordered scan of the questions accepted by `filter`
    async fn list_questions(&self, filter: &QuestionFilter) -> QuizResult<Vec<Question>>;

    /// Look up a single question
    async fn get_question(&self, id: QuestionId) -> QuizResult<Option<Question>>;

    /// Total number of stored questions
    async fn count_questions(&self) -> QuizResult<usize>;

    /// Insert a question and return it with its assigned id
    async fn insert_question(&self, question: &NewQuestion) -> QuizResult<Question>;

    /// Apply an update, failing with `NotFound` for an unknown id
    async fn update_question(&self, id: QuestionId, update: &QuestionUpdate)
    -> QuizResult<Question>;

    /// Delete a question, failing with `NotFound` for an unknown id
    async fn delete_question(&self, id: QuestionId) -> QuizResult<()>;

    /// All categories ordered by id
    async fn list_categories(&self) -> QuizResult<Vec<Category>>;

    /// Look up a single category
    async fn get_category(&self, id: CategoryId) -> QuizResult<Option<Category>>;

    /// Insert a category and return it with its assigned id
    async fn insert_category(&self, kind: &str) -> QuizResult<Category>;

    /// Insert categories, then questions.
    ///
    /// A question category that is a 1-based position into `categories` is
    /// rewritten to the id assigned to that category. Every label and
    /// question is validated before anything is written.
    async fn import(
        &self,
        categories: Vec<String>,
        questions: Vec<NewQuestion>,
    ) -> QuizResult<(Vec<Category>, Vec<Question>)> {
        validate_import(&categories, &questions)?;

        let mut inserted_categories = Vec::with_capacity(categories.len());
        for kind in &categories {
            inserted_categories.push(self.insert_category(kind).await?);
        }

        let mut inserted_questions = Vec::with_capacity(questions.len());
        for mut question in questions {
            question.category = resolve_import_category(question.category, &inserted_categories);
            inserted_questions.push(self.insert_question(&question).await?);
        }

        Ok((inserted_categories, inserted_questions))
    }
}

/// Validate a whole import batch up front
pub fn validate_import(categories: &[String], questions: &[NewQuestion]) -> QuizResult<()> {
    for kind in categories {
        validate_category_kind(kind)?;
    }
    for question in questions {
        question.validate()?;
    }
    Ok(())
}

/// Map a 1-based position into freshly imported categories to its id
pub fn resolve_import_category(category: CategoryId, imported: &[Category]) -> CategoryId {
    category
        .checked_sub(1)
        .and_then(|index| usize::try_from(index).ok())
        .and_then(|index| imported.get(index))
        .map_or(category, |imported| imported.id)
}
