/*!
 * Question and category records plus the typed requests that mutate them.
 *
 * These structures map directly to database tables and provide
 * type-safe access to persisted data.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{QuizError, QuizResult};

/// Question identifier, assigned by the store on insert
pub type QuestionId = i64;

/// Category identifier
pub type CategoryId = i64;

/// Difficulty level on a 1–5 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(level: i64) -> QuizResult<Self> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&level) {
            Ok(Self(level as u8))
        } else {
            Err(QuizError::InvalidInput(format!(
                "difficulty must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                level
            )))
        }
    }

    pub fn level(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Difficulty {
    type Error = QuizError;

    fn try_from(level: i64) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<Difficulty> for i64 {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.0 as i64
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stored question record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Unique identifier, never reused after deletion
    pub id: QuestionId,
    /// Question text
    pub question: String,
    /// Answer text
    pub answer: String,
    /// Category reference (not checked against the categories table)
    pub category: CategoryId,
    /// Difficulty level
    pub difficulty: Difficulty,
}

impl Question {
    /// Render the transport representation of this question
    pub fn format(&self) -> FormattedQuestion {
        FormattedQuestion {
            id: self.id,
            question: self.question.clone(),
            answer: self.answer.clone(),
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}

/// Transport-ready question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedQuestion {
    pub id: QuestionId,
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: Difficulty,
}

/// Stored category record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    /// Display label
    #[serde(rename = "type")]
    pub kind: String,
}

/// Fields required to create a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: Difficulty,
}

impl NewQuestion {
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        category: CategoryId,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            category,
            difficulty,
        }
    }

    /// Check every field before the record reaches the store
    pub fn validate(&self) -> QuizResult<()> {
        require_text("question", &self.question)?;
        require_text("answer", &self.answer)?;
        require_category(self.category)?;
        Ok(())
    }
}

/// Fields a caller may change on an existing question
///
/// Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuestionUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

impl QuestionUpdate {
    pub fn is_empty(&self) -> bool {
        self.question.is_none()
            && self.answer.is_none()
            && self.category.is_none()
            && self.difficulty.is_none()
    }

    /// Validate each field that is present
    pub fn validate(&self) -> QuizResult<()> {
        if self.is_empty() {
            return Err(QuizError::InvalidInput(
                "update must set at least one field".to_string(),
            ));
        }
        if let Some(question) = &self.question {
            require_text("question", question)?;
        }
        if let Some(answer) = &self.answer {
            require_text("answer", answer)?;
        }
        if let Some(category) = self.category {
            require_category(category)?;
        }
        Ok(())
    }

    /// Apply the present fields to a record in place
    pub fn apply_to(&self, question: &mut Question) {
        if let Some(text) = &self.question {
            question.question = text.clone();
        }
        if let Some(answer) = &self.answer {
            question.answer = answer.clone();
        }
        if let Some(category) = self.category {
            question.category = category;
        }
        if let Some(difficulty) = self.difficulty {
            question.difficulty = difficulty;
        }
    }
}

/// Filter applied to an ordered question scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    /// Keep only questions in this category
    pub category: Option<CategoryId>,
    /// Keep only questions whose text contains this term, ignoring case
    pub text_contains: Option<String>,
}

impl QuestionFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn in_category(category: CategoryId) -> Self {
        Self {
            category: Some(category),
            text_contains: None,
        }
    }

    pub fn containing(term: impl Into<String>) -> Self {
        Self {
            category: None,
            text_contains: Some(term.into()),
        }
    }

    /// Whether a record passes this filter
    pub fn accepts(&self, question: &Question) -> bool {
        if let Some(category) = self.category {
            if question.category != category {
                return false;
            }
        }
        match &self.text_contains {
            Some(term) => crate::quiz::search::matches(term, &question.question),
            None => true,
        }
    }
}

/// Check a category display label
pub fn validate_category_kind(kind: &str) -> QuizResult<()> {
    if kind.trim().is_empty() {
        return Err(QuizError::InvalidInput("category type must not be empty".to_string()));
    }
    Ok(())
}

fn require_text(field: &str, value: &str) -> QuizResult<()> {
    if value.trim().is_empty() {
        return Err(QuizError::InvalidInput(format!("{} must not be empty", field)));
    }
    Ok(())
}

fn require_category(category: CategoryId) -> QuizResult<()> {
    if category <= 0 {
        return Err(QuizError::InvalidInput(format!(
            "category must be a positive identifier, got {}",
            category
        )));
    }
    Ok(())
}
