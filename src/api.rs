/*!
 * Request and response envelopes.
 *
 * Every successful response carries `success: true`; failures are reported
 * with `errors::ErrorResponse`. Field names follow the JSON shapes existing
 * quiz clients already consume.
 */

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

use crate::database::models::{Category, CategoryId, FormattedQuestion, NewQuestion, QuestionId};

/// Category map keyed by id, values are the display labels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: BTreeMap<CategoryId, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryResponse {
    pub success: bool,
    pub category: Category,
}

/// One page of the full question listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionListResponse {
    pub success: bool,
    pub questions: Vec<FormattedQuestion>,
    /// Number of questions in the store
    pub total_questions: usize,
    pub categories: Vec<Category>,
    pub current_category: Option<CategoryId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionResponse {
    pub success: bool,
    pub question: FormattedQuestion,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub created: QuestionId,
    pub questions: Vec<FormattedQuestion>,
    pub total_questions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub deleted: QuestionId,
    pub questions: Vec<FormattedQuestion>,
    pub total_questions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdatedResponse {
    pub success: bool,
    pub id: QuestionId,
}

/// One page of search matches
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub questions: Vec<FormattedQuestion>,
    /// Number of matching questions, not the store total
    pub total_questions: usize,
}

/// One page of a single category's questions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryQuestionsResponse {
    pub success: bool,
    pub questions: Vec<FormattedQuestion>,
    /// Number of questions in the store
    pub total_questions: usize,
    pub current_category: CategoryId,
}

/// Category selection sent with a play request; id 0 means all categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizCategory {
    pub id: CategoryId,
}

/// Request for the next quiz question
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayRequest {
    /// Questions already served in this quiz session
    #[serde(default)]
    pub previous_questions: Vec<QuestionId>,
    #[serde(default)]
    pub quiz_category: Option<QuizCategory>,
}

impl PlayRequest {
    pub fn new(category: CategoryId, previous_questions: Vec<QuestionId>) -> Self {
        Self {
            previous_questions,
            quiz_category: Some(QuizCategory { id: category }),
        }
    }
}

/// Next quiz question, serialized as `false` once the quiz is exhausted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayResponse {
    #[serde(serialize_with = "question_or_false")]
    pub question: Option<FormattedQuestion>,
}

fn question_or_false<S>(question: &Option<FormattedQuestion>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match question {
        Some(question) => question.serialize(serializer),
        None => serializer.serialize_bool(false),
    }
}

/// Bulk import payload
///
/// A question's `category` is the 1-based position of a category in
/// `categories`; values outside that range are stored unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRequest {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub questions: Vec<NewQuestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportResponse {
    pub success: bool,
    pub categories: Vec<Category>,
    pub created: Vec<QuestionId>,
}
