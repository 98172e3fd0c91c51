/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use trivia::app_config::{Config, LogLevel, MAX_PAGE_SIZE};

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.quiz.page_size, 10);
    assert_eq!(config.quiz.random_seed, None);
    assert_eq!(config.database.path, None);
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.log_level.to_level_filter(), log::LevelFilter::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.quiz.page_size = 0;
    assert!(config.validate().is_err());

    config.quiz.page_size = MAX_PAGE_SIZE + 1;
    assert!(config.validate().is_err());

    config.quiz.page_size = 25;
    config.database.path = Some(PathBuf::new());
    assert!(config.validate().is_err());

    config.database.path = Some(PathBuf::from("quiz.db"));
    assert!(config.validate().is_ok());
}

/// Test saving and loading a configuration file
#[test]
fn test_config_saveAndLoad_shouldPreserveValues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.quiz.page_size = 20;
    config.quiz.random_seed = Some(99);
    config.log_level = LogLevel::Debug;
    config.save(&path)?;

    let loaded = Config::from_file(&path)?;
    assert_eq!(loaded, config);
    Ok(())
}

/// Test a hand-written configuration file
#[test]
fn test_config_fromFile_withLowercaseLevel_shouldParse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");
    fs::write(
        &path,
        r#"{
            "database": { "path": ":memory:" },
            "quiz": { "page_size": 5 },
            "log_level": "warn"
        }"#,
    )?;

    let config = Config::from_file(&path)?;
    assert_eq!(config.database.path, Some(PathBuf::from(":memory:")));
    assert_eq!(config.quiz.page_size, 5);
    assert_eq!(config.log_level, LogLevel::Warn);
    Ok(())
}

#[test]
fn test_config_fromFile_withMalformedJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");
    fs::write(&path, "{ not json")?;

    assert!(Config::from_file(&path).is_err());
    Ok(())
}

#[test]
fn test_config_loadOrCreate_withExistingFile_shouldNotOverwrite() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");
    fs::write(&path, r#"{ "quiz": { "page_size": 3 } }"#)?;

    let config = Config::load_or_create(&path)?;
    assert_eq!(config.quiz.page_size, 3);
    assert!(fs::read_to_string(&path)?.contains("\"page_size\": 3"));
    Ok(())
}
