/*!
 * Tests for the error taxonomy
 */

use trivia::{ErrorResponse, QuizError};

#[test]
fn test_notFound_shouldNameResourceAndId() {
    let error = QuizError::question_not_found(12);
    assert_eq!(error.to_string(), "question not found: 12");
    assert_eq!(error.status_code(), 404);

    let error = QuizError::page_not_found(4);
    assert!(matches!(error, QuizError::NotFound { resource: "page", id: 4 }));
}

/// Test the JSON shape of the error envelope
#[test]
fn test_errorResponse_shouldSerializeEnvelope() {
    let response = ErrorResponse::from(&QuizError::InvalidInput("difficulty".to_string()));
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["success"], false);
    assert_eq!(json["error"], 400);
    assert_eq!(json["message"], "Bad request.");
}

/// Internal detail stays out of the public message
#[test]
fn test_errorResponse_shouldNotLeakDetail() {
    let error = QuizError::StoreUnavailable("disk I/O error at /var/lib/trivia.db".to_string());
    let response = ErrorResponse::from(&error);

    assert_eq!(response.error, 503);
    assert!(!response.message.contains("/var/lib"));
    assert!(error.to_string().contains("/var/lib"));
}

#[test]
fn test_unprocessable_shouldMapTo422() {
    let response = ErrorResponse::from(&QuizError::Unprocessable("constraint".to_string()));
    assert_eq!(response.error, 422);
    assert_eq!(response.message, "Unprocessable.");
}
