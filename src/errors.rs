/*!
 * Error types for the trivia engine.
 *
 * Store implementations and the controller report failures through
 * `QuizError`, a small tagged taxonomy that the request handler maps onto
 * response status codes. An empty result (no matching questions, an
 * exhausted quiz) is never an error.
 */

use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the question store and the controller
#[derive(Error, Debug)]
pub enum QuizError {
    /// No record exists for the requested identifier
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Kind of record that was looked up ("question", "category", "page")
        resource: &'static str,
        /// Identifier that was looked up
        id: i64,
    },

    /// Request parameters or fields failed validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The store refused to complete a mutation
    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    /// The store could not be reached or failed to execute
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl QuizError {
    pub fn question_not_found(id: i64) -> Self {
        Self::NotFound { resource: "question", id }
    }

    pub fn category_not_found(id: i64) -> Self {
        Self::NotFound { resource: "category", id }
    }

    pub fn page_not_found(page: i64) -> Self {
        Self::NotFound { resource: "page", id: page }
    }

    /// Status code used in the error envelope
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::InvalidInput(_) => 400,
            Self::Unprocessable(_) => 422,
            Self::StoreUnavailable(_) => 503,
        }
    }

    /// Short, user-facing message for the status code
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "Resource not found.",
            Self::InvalidInput(_) => "Bad request.",
            Self::Unprocessable(_) => "Unprocessable.",
            Self::StoreUnavailable(_) => "Service unavailable.",
        }
    }

    /// Map a store failure onto the taxonomy.
    ///
    /// Constraint violations mean the store rejected the data and become
    /// `Unprocessable`; everything else means the store itself failed.
    pub fn from_store(error: anyhow::Error) -> Self {
        let constraint = error
            .chain()
            .filter_map(|cause| cause.downcast_ref::<rusqlite::Error>())
            .any(|e| {
                matches!(
                    e.sqlite_error_code(),
                    Some(rusqlite::ErrorCode::ConstraintViolation)
                )
            });

        if constraint {
            Self::Unprocessable(error.to_string())
        } else {
            Self::StoreUnavailable(format!("{:#}", error))
        }
    }
}

/// Error envelope returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: u16,
    pub message: String,
}

impl From<&QuizError> for ErrorResponse {
    fn from(error: &QuizError) -> Self {
        Self {
            success: false,
            error: error.status_code(),
            message: error.public_message().to_string(),
        }
    }
}

/// Result alias for store and controller operations
pub type QuizResult<T> = Result<T, QuizError>;
