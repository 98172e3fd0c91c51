/*!
 * Integration tests for multi-round quiz sessions
 */

use anyhow::Result;
use std::collections::HashSet;

use trivia::api::PlayRequest;

use crate::common;

/// Play a category until it runs out, feeding back every served id
async fn play_until_exhausted(
    controller: &trivia::Controller,
    category: i64,
) -> Result<Vec<i64>> {
    let mut previous = Vec::new();
    loop {
        let response = controller
            .play(&PlayRequest::new(category, previous.clone()))
            .await?;
        match response.question {
            Some(question) => previous.push(question.id),
            None => return Ok(previous),
        }
    }
}

/// Test a session driven from synchronous code
#[test]
fn test_session_blockingDriver_shouldFinishCategory() -> Result<()> {
    common::init_test_logging();
    let controller = common::sample_controller()?;

    let served = tokio_test::block_on(play_until_exhausted(&controller, 2))?;

    assert_eq!(served.len(), 2);
    Ok(())
}

/// Test that a session never repeats and covers the whole category
#[tokio::test]
async fn test_session_singleCategory_shouldServeEachQuestionOnce() -> Result<()> {
    common::init_test_logging();
    let controller = common::sample_controller()?;

    let served = play_until_exhausted(&controller, 1).await?;

    let unique: HashSet<i64> = served.iter().copied().collect();
    assert_eq!(served.len(), 3);
    assert_eq!(unique, [1, 2, 3].into_iter().collect());
    Ok(())
}

#[tokio::test]
async fn test_session_allCategories_shouldServeEveryQuestion() -> Result<()> {
    let controller = common::sample_controller()?;

    let served = play_until_exhausted(&controller, 0).await?;

    let unique: HashSet<i64> = served.iter().copied().collect();
    assert_eq!(unique.len(), 9);
    assert_eq!(served.len(), 9);
    Ok(())
}

/// Test the wire shape of an exhausted quiz
#[tokio::test]
async fn test_session_exhausted_shouldSerializeQuestionAsFalse() -> Result<()> {
    let controller = common::sample_controller()?;

    let response = controller.play(&PlayRequest::new(3, vec![6])).await?;
    let json = serde_json::to_value(&response)?;

    assert_eq!(json["question"], serde_json::Value::Bool(false));
    Ok(())
}

/// Test that the same seed reproduces a whole session
#[tokio::test]
async fn test_session_withSameSeed_shouldReplayOrder() -> Result<()> {
    let first = play_until_exhausted(&common::sample_controller()?, 0).await?;
    let second = play_until_exhausted(&common::sample_controller()?, 0).await?;

    assert_eq!(first, second);
    Ok(())
}
