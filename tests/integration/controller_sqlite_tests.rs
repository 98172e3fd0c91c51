/*!
 * Integration tests for the controller over a SQLite database file
 */

use anyhow::Result;

use trivia::api::ImportRequest;
use trivia::database::{DatabaseConnection, Repository};
use trivia::{Config, Controller, PageRequest, QuestionStore, QuestionUpdate, QuizError};

use crate::common::{self, new_question};

/// Test a full create, read, update and delete cycle on disk
#[tokio::test]
async fn test_crudCycle_onSqlite_shouldPersistEachStep() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let (controller, _repository) = common::sqlite_controller(&temp_dir).await?;

    let created = controller
        .create_question(&new_question("What is the boiling point of water?", 1, 1), PageRequest::default())
        .await?;
    assert_eq!(created.created, 1);
    assert_eq!(created.total_questions, 1);

    let update = QuestionUpdate {
        answer: Some("100 C".to_string()),
        difficulty: Some(trivia::Difficulty::new(2)?),
        ..Default::default()
    };
    controller.update_question(created.created, &update).await?;

    let question = controller.question(created.created).await?.question;
    assert_eq!(question.answer, "100 C");
    assert_eq!(question.difficulty.level(), 2);

    let deleted = controller
        .delete_question(created.created, PageRequest::default())
        .await?;
    assert_eq!(deleted.total_questions, 0);
    assert!(deleted.questions.is_empty());

    assert!(matches!(
        controller.question(created.created).await,
        Err(QuizError::NotFound { .. })
    ));
    Ok(())
}

/// Test that data survives reopening the file
#[tokio::test]
async fn test_reopenDatabase_shouldKeepRecords() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("trivia.db");

    {
        let repository = Repository::new(DatabaseConnection::new(&path)?);
        repository.insert_category("Science").await?;
        repository
            .insert_question(&new_question("Who discovered penicillin?", 1, 3))
            .await?;
    }

    let mut config = Config::default();
    config.database.path = Some(path);
    let controller = Controller::with_config(config)?;

    let listing = controller.list_questions(PageRequest::default()).await?;
    assert_eq!(listing.total_questions, 1);
    assert_eq!(listing.categories[0].kind, "Science");
    Ok(())
}

/// Test that pages over a larger store follow insertion order
#[tokio::test]
async fn test_listQuestions_withTwentyFive_shouldPageByTen() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let (controller, repository) = common::sqlite_controller(&temp_dir).await?;
    for index in 1..=25 {
        repository
            .insert_question(&new_question(&format!("Question {}?", index), 1, 1))
            .await?;
    }

    let third = controller.list_questions(PageRequest::new(3)).await?;
    assert_eq!(third.questions.len(), 5);
    assert_eq!(third.questions[0].id, 21);
    assert_eq!(third.total_questions, 25);

    assert!(matches!(
        controller.list_questions(PageRequest::new(4)).await,
        Err(QuizError::NotFound { resource: "page", id: 4 })
    ));
    Ok(())
}

#[tokio::test]
async fn test_searchQuestions_onSqlite_shouldFoldCase() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let (controller, repository) = common::sqlite_controller(&temp_dir).await?;
    repository
        .insert_question(&new_question("Which planet is known as the Red Planet?", 1, 1))
        .await?;
    repository
        .insert_question(&new_question("Who painted the Mona Lisa?", 2, 1))
        .await?;

    let response = controller.search_questions("PLANET", PageRequest::default()).await?;

    assert_eq!(response.total_questions, 1);
    assert_eq!(response.questions[0].id, 1);
    Ok(())
}

/// Test that an import is all-or-nothing on SQLite
#[tokio::test]
async fn test_import_onSqlite_shouldResolveCategoriesInOneTransaction() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let (controller, repository) = common::sqlite_controller(&temp_dir).await?;

    let response = controller
        .import(ImportRequest {
            categories: vec!["Music".to_string()],
            questions: vec![
                new_question("Who composed the Four Seasons?", 1, 2),
                new_question("Which planet is largest?", 3, 2),
            ],
        })
        .await?;

    assert_eq!(response.categories[0].id, 7);
    let first = repository.get_question(response.created[0]).await?;
    let second = repository.get_question(response.created[1]).await?;
    assert_eq!(first.map(|q| q.category), Some(7));
    assert_eq!(second.map(|q| q.category), Some(3));
    Ok(())
}

#[tokio::test]
async fn test_play_onSqlite_shouldDrawFromCategory() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let (controller, repository) = common::sqlite_controller(&temp_dir).await?;
    repository.insert_question(&new_question("One?", 1, 1)).await?;
    repository.insert_question(&new_question("Two?", 2, 1)).await?;
    repository.insert_question(&new_question("Three?", 2, 1)).await?;

    let response = controller
        .play(&trivia::api::PlayRequest::new(2, vec![2]))
        .await?;

    assert_eq!(response.question.map(|q| q.id), Some(3));
    Ok(())
}

/// Test that a blank label fails the import as invalid input with no rows written
#[tokio::test]
async fn test_import_onSqlite_withBlankCategoryLabel_shouldWriteNothing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let (controller, repository) = common::sqlite_controller(&temp_dir).await?;

    let result = controller
        .import(ImportRequest {
            categories: vec!["Music".to_string(), " ".to_string()],
            questions: vec![new_question("Who composed the Four Seasons?", 1, 2)],
        })
        .await;

    assert!(matches!(result, Err(QuizError::InvalidInput(_))));
    assert_eq!(repository.list_categories().await?.len(), 6);
    assert_eq!(repository.count_questions().await?, 0);
    Ok(())
}
