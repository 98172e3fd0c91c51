/*!
 * Repository layer for database operations.
 *
 * This module provides the SQLite implementation of `QuestionStore`,
 * abstracting away the SQL details and providing type-safe access.
 */

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::connection::DatabaseConnection;
use super::models::{
    Category, CategoryId, Difficulty, NewQuestion, Question, QuestionFilter, QuestionId,
    QuestionUpdate, validate_category_kind,
};
use crate::errors::{QuizError, QuizResult};
use crate::quiz::search;
use crate::store::{QuestionStore, resolve_import_category, validate_import};

const QUESTION_COLUMNS: &str = "id, question, answer, category, difficulty";

/// SQLite-backed question store
#[derive(Clone, Debug)]
pub struct Repository {
    db: DatabaseConnection,
}

impl Repository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository with an in-memory database
    pub fn new_in_memory() -> Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    fn question_from_row(row: &Row<'_>) -> rusqlite::Result<Question> {
        let level: i64 = row.get(4)?;
        let difficulty = Difficulty::new(level).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Integer, Box::new(e))
        })?;

        Ok(Question {
            id: row.get(0)?,
            question: row.get(1)?,
            answer: row.get(2)?,
            category: row.get(3)?,
            difficulty,
        })
    }

    fn category_from_row(row: &Row<'_>) -> rusqlite::Result<Category> {
        Ok(Category {
            id: row.get(0)?,
            kind: row.get(1)?,
        })
    }

    /// Get a question by ID (synchronous version for use within transactions)
    fn get_question_sync(conn: &Connection, id: QuestionId) -> Result<Option<Question>> {
        let question = conn
            .query_row(
                &format!("SELECT {} FROM questions WHERE id = ?1", QUESTION_COLUMNS),
                [id],
                Self::question_from_row,
            )
            .optional()?;
        Ok(question)
    }

    fn list_questions_sync(conn: &Connection, filter: &QuestionFilter) -> Result<Vec<Question>> {
        let mut questions = match filter.category {
            Some(category) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM questions WHERE category = ?1 ORDER BY id",
                    QUESTION_COLUMNS
                ))?;
                let rows = stmt.query_map([category], Self::question_from_row)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
            None => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM questions ORDER BY id",
                    QUESTION_COLUMNS
                ))?;
                let rows = stmt.query_map([], Self::question_from_row)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
        };

        // SQLite's LIKE and lower() only fold ASCII, so text matching runs here
        if let Some(term) = &filter.text_contains {
            questions.retain(|question| search::matches(term, &question.question));
        }

        Ok(questions)
    }

    fn insert_question_sync(conn: &Connection, question: &NewQuestion) -> Result<Question> {
        conn.execute(
            "INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)",
            params![
                question.question,
                question.answer,
                question.category,
                i64::from(question.difficulty),
            ],
        )?;

        Ok(Question {
            id: conn.last_insert_rowid(),
            question: question.question.clone(),
            answer: question.answer.clone(),
            category: question.category,
            difficulty: question.difficulty,
        })
    }
}

#[async_trait]
impl QuestionStore for Repository {
    async fn list_questions(&self, filter: &QuestionFilter) -> QuizResult<Vec<Question>> {
        let filter = filter.clone();

        self.db
            .execute_async(move |conn| Self::list_questions_sync(conn, &filter))
            .await
            .map_err(QuizError::from_store)
    }

    async fn get_question(&self, id: QuestionId) -> QuizResult<Option<Question>> {
        self.db
            .execute_async(move |conn| Self::get_question_sync(conn, id))
            .await
            .map_err(QuizError::from_store)
    }

    async fn count_questions(&self) -> QuizResult<usize> {
        self.db
            .execute_async(|conn| {
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM questions", [], |row| row.get(0))?;
                Ok(count as usize)
            })
            .await
            .map_err(QuizError::from_store)
    }

    async fn insert_question(&self, question: &NewQuestion) -> QuizResult<Question> {
        question.validate()?;
        let question = question.clone();

        let inserted = self
            .db
            .execute_async(move |conn| Self::insert_question_sync(conn, &question))
            .await
            .map_err(QuizError::from_store)?;

        debug!("Inserted question {}", inserted.id);
        Ok(inserted)
    }

    async fn update_question(
        &self,
        id: QuestionId,
        update: &QuestionUpdate,
    ) -> QuizResult<Question> {
        update.validate()?;
        let update = update.clone();

        let updated = self
            .db
            .transaction_async(move |tx| {
                let Some(mut question) = Self::get_question_sync(tx, id)? else {
                    return Ok(None);
                };
                update.apply_to(&mut question);

                tx.execute(
                    "UPDATE questions SET question = ?1, answer = ?2, category = ?3, difficulty = ?4 WHERE id = ?5",
                    params![
                        question.question,
                        question.answer,
                        question.category,
                        i64::from(question.difficulty),
                        id,
                    ],
                )?;
                Ok(Some(question))
            })
            .await
            .map_err(QuizError::from_store)?;

        updated.ok_or_else(|| QuizError::question_not_found(id))
    }

    async fn delete_question(&self, id: QuestionId) -> QuizResult<()> {
        let deleted = self
            .db
            .execute_async(move |conn| {
                Ok(conn.execute("DELETE FROM questions WHERE id = ?1", [id])?)
            })
            .await
            .map_err(QuizError::from_store)?;

        if deleted == 0 {
            return Err(QuizError::question_not_found(id));
        }
        debug!("Deleted question {}", id);
        Ok(())
    }

    async fn list_categories(&self) -> QuizResult<Vec<Category>> {
        self.db
            .execute_async(|conn| {
                let mut stmt = conn.prepare("SELECT id, type FROM categories ORDER BY id")?;
                let rows = stmt.query_map([], Self::category_from_row)?;
                Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
            })
            .await
            .map_err(QuizError::from_store)
    }

    async fn get_category(&self, id: CategoryId) -> QuizResult<Option<Category>> {
        self.db
            .execute_async(move |conn| {
                Ok(conn
                    .query_row(
                        "SELECT id, type FROM categories WHERE id = ?1",
                        [id],
                        Self::category_from_row,
                    )
                    .optional()?)
            })
            .await
            .map_err(QuizError::from_store)
    }

    async fn insert_category(&self, kind: &str) -> QuizResult<Category> {
        validate_category_kind(kind)?;
        let kind = kind.to_string();

        self.db
            .execute_async(move |conn| {
                conn.execute("INSERT INTO categories (type) VALUES (?1)", [&kind])?;
                Ok(Category {
                    id: conn.last_insert_rowid(),
                    kind,
                })
            })
            .await
            .map_err(QuizError::from_store)
    }

    /// Same mapping as the default, but all rows commit in one transaction
    async fn import(
        &self,
        categories: Vec<String>,
        questions: Vec<NewQuestion>,
    ) -> QuizResult<(Vec<Category>, Vec<Question>)> {
        validate_import(&categories, &questions)?;

        self.db
            .transaction_async(move |tx| {
                let mut inserted_categories = Vec::with_capacity(categories.len());
                for kind in categories {
                    tx.execute("INSERT INTO categories (type) VALUES (?1)", [&kind])?;
                    inserted_categories.push(Category {
                        id: tx.last_insert_rowid(),
                        kind,
                    });
                }

                let mut inserted_questions = Vec::with_capacity(questions.len());
                for mut question in questions {
                    question.category =
                        resolve_import_category(question.category, &inserted_categories);
                    inserted_questions.push(Self::insert_question_sync(tx, &question)?);
                }

                debug!(
                    "Imported {} categories and {} questions",
                    inserted_categories.len(),
                    inserted_questions.len()
                );
                Ok((inserted_categories, inserted_questions))
            })
            .await
            .map_err(QuizError::from_store)
    }
}
