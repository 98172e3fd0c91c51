/*!
 * In-memory question store.
 *
 * Keeps records in ordered maps behind a read-write lock. Identifiers come
 * from monotonically increasing counters, so a deleted id is never handed
 * out again.
 */

use async_trait::async_trait;
use log::debug;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::QuestionStore;
use crate::database::models::{
    Category, CategoryId, NewQuestion, Question, QuestionFilter, QuestionId, QuestionUpdate,
    validate_category_kind,
};
use crate::errors::{QuizError, QuizResult};

#[derive(Debug, Default)]
struct Inner {
    questions: BTreeMap<QuestionId, Question>,
    categories: BTreeMap<CategoryId, Category>,
    last_question_id: QuestionId,
    last_category_id: CategoryId,
}

/// Process-local question store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store holding the given categories and questions.
    ///
    /// Records keep their ids; the id counters continue after the highest
    /// one seen.
    pub fn with_records(categories: Vec<Category>, questions: Vec<Question>) -> Self {
        let mut inner = Inner::default();

        for category in categories {
            inner.last_category_id = inner.last_category_id.max(category.id);
            inner.categories.insert(category.id, category);
        }
        for question in questions {
            inner.last_question_id = inner.last_question_id.max(question.id);
            inner.questions.insert(question.id, question);
        }

        Self {
            inner: Arc::new(RwLock::new(inner)),
        }
    }
}

#[async_trait]
impl QuestionStore for MemoryStore {
    async fn list_questions(&self, filter: &QuestionFilter) -> QuizResult<Vec<Question>> {
        let inner = self.inner.read();
        Ok(inner
            .questions
            .values()
            .filter(|question| filter.accepts(question))
            .cloned()
            .collect())
    }

    async fn get_question(&self, id: QuestionId) -> QuizResult<Option<Question>> {
        Ok(self.inner.read().questions.get(&id).cloned())
    }

    async fn count_questions(&self) -> QuizResult<usize> {
        Ok(self.inner.read().questions.len())
    }

    async fn insert_question(&self, question: &NewQuestion) -> QuizResult<Question> {
        question.validate()?;

        let mut inner = self.inner.write();
        inner.last_question_id += 1;
        let record = Question {
            id: inner.last_question_id,
            question: question.question.clone(),
            answer: question.answer.clone(),
            category: question.category,
            difficulty: question.difficulty,
        };
        inner.questions.insert(record.id, record.clone());

        debug!("Inserted question {} into memory store", record.id);
        Ok(record)
    }

    async fn update_question(
        &self,
        id: QuestionId,
        update: &QuestionUpdate,
    ) -> QuizResult<Question> {
        update.validate()?;

        let mut inner = self.inner.write();
        let record = inner
            .questions
            .get_mut(&id)
            .ok_or_else(|| QuizError::question_not_found(id))?;
        update.apply_to(record);

        Ok(record.clone())
    }

    async fn delete_question(&self, id: QuestionId) -> QuizResult<()> {
        match self.inner.write().questions.remove(&id) {
            Some(_) => {
                debug!("Deleted question {} from memory store", id);
                Ok(())
            }
            None => Err(QuizError::question_not_found(id)),
        }
    }

    async fn list_categories(&self) -> QuizResult<Vec<Category>> {
        Ok(self.inner.read().categories.values().cloned().collect())
    }

    async fn get_category(&self, id: CategoryId) -> QuizResult<Option<Category>> {
        Ok(self.inner.read().categories.get(&id).cloned())
    }

    async fn insert_category(&self, kind: &str) -> QuizResult<Category> {
        validate_category_kind(kind)?;

        let mut inner = self.inner.write();
        inner.last_category_id += 1;
        let category = Category {
            id: inner.last_category_id,
            kind: kind.to_string(),
        };
        inner.categories.insert(category.id, category.clone());
        Ok(category)
    }
}
