use anyhow::{Context, Result};
use log::{debug, info};
use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::api::{
    CategoriesResponse, CategoryQuestionsResponse, CategoryResponse, CreatedResponse,
    DeletedResponse, ImportRequest, ImportResponse, PlayRequest, PlayResponse,
    QuestionListResponse, QuestionResponse, SearchResponse, UpdatedResponse,
};
use crate::app_config::Config;
use crate::database::models::{
    CategoryId, FormattedQuestion, NewQuestion, Question, QuestionFilter, QuestionId,
    QuestionUpdate,
};
use crate::database::{DatabaseConnection, Repository};
use crate::errors::{QuizError, QuizResult};
use crate::quiz::{self, CategoryScope, PageRequest, RandomSource};
use crate::store::QuestionStore;

/// Random source shared by concurrent play requests
type SharedRandom = Mutex<Box<dyn RandomSource + Send>>;

/// Application controller: runs each quiz operation against a question
/// store and shapes the response envelope
pub struct Controller {
    config: Config,
    store: Arc<dyn QuestionStore>,
    rng: SharedRandom,
}

impl Controller {
    /// Create a controller over an existing store.
    ///
    /// The draw is seeded from `quiz.random_seed` when set, otherwise from
    /// the operating system.
    pub fn new(config: Config, store: Arc<dyn QuestionStore>) -> Result<Self> {
        let rng = match config.quiz.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_random_source(config, store, Box::new(rng))
    }

    /// Create a controller with an explicit random source
    pub fn with_random_source(
        config: Config,
        store: Arc<dyn QuestionStore>,
        rng: Box<dyn RandomSource + Send>,
    ) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        Ok(Self {
            config,
            store,
            rng: Mutex::new(rng),
        })
    }

    /// Open the configured SQLite database and build a controller over it
    pub fn with_config(config: Config) -> Result<Self> {
        let path = config.database.resolve_path()?;
        let db = DatabaseConnection::new(&path)?;
        info!("Using question database at {:?}", db.path());

        Self::new(config, Arc::new(Repository::new(db)))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn page_size(&self) -> usize {
        self.config.quiz.page_size
    }

    /// Format the requested window of `questions`
    fn page_of(&self, questions: &[Question], page: PageRequest) -> Vec<FormattedQuestion> {
        quiz::paginate(page.page, self.page_size(), questions)
            .iter()
            .map(Question::format)
            .collect()
    }

    async fn current_page(&self, page: PageRequest) -> QuizResult<(Vec<FormattedQuestion>, usize)> {
        let questions = self.store.list_questions(&QuestionFilter::all()).await?;
        Ok((self.page_of(&questions, page), questions.len()))
    }

    /// All categories as an id → label map
    pub async fn categories(&self) -> QuizResult<CategoriesResponse> {
        let categories: BTreeMap<CategoryId, String> = self
            .store
            .list_categories()
            .await?
            .into_iter()
            .map(|category| (category.id, category.kind))
            .collect();

        Ok(CategoriesResponse {
            success: true,
            categories,
        })
    }

    pub async fn category(&self, id: CategoryId) -> QuizResult<CategoryResponse> {
        let category = self
            .store
            .get_category(id)
            .await?
            .ok_or_else(|| QuizError::category_not_found(id))?;

        Ok(CategoryResponse {
            success: true,
            category,
        })
    }

    /// One page of every question; an empty page is `NotFound`
    pub async fn list_questions(&self, page: PageRequest) -> QuizResult<QuestionListResponse> {
        let (questions, total_questions) = self.current_page(page).await?;
        if questions.is_empty() {
            return Err(QuizError::page_not_found(page.page));
        }
        let categories = self.store.list_categories().await?;

        Ok(QuestionListResponse {
            success: true,
            questions,
            total_questions,
            categories,
            current_category: None,
        })
    }

    pub async fn question(&self, id: QuestionId) -> QuizResult<QuestionResponse> {
        let question = self
            .store
            .get_question(id)
            .await?
            .ok_or_else(|| QuizError::question_not_found(id))?;

        Ok(QuestionResponse {
            success: true,
            question: question.format(),
        })
    }

    /// Delete a question and return the refreshed page
    pub async fn delete_question(
        &self,
        id: QuestionId,
        page: PageRequest,
    ) -> QuizResult<DeletedResponse> {
        self.store.delete_question(id).await?;
        info!("Deleted question {}", id);

        let (questions, total_questions) = self.current_page(page).await?;
        Ok(DeletedResponse {
            success: true,
            deleted: id,
            questions,
            total_questions,
        })
    }

    /// Create a question and return the refreshed page
    pub async fn create_question(
        &self,
        question: &NewQuestion,
        page: PageRequest,
    ) -> QuizResult<CreatedResponse> {
        question.validate()?;
        let created = self.store.insert_question(question).await?;
        info!("Created question {} in category {}", created.id, created.category);

        let (questions, total_questions) = self.current_page(page).await?;
        Ok(CreatedResponse {
            success: true,
            created: created.id,
            questions,
            total_questions,
        })
    }

    /// One page of questions whose text contains `term`, ignoring case.
    ///
    /// `total_questions` counts the matches. No matches is a valid, empty
    /// result.
    pub async fn search_questions(
        &self,
        term: &str,
        page: PageRequest,
    ) -> QuizResult<SearchResponse> {
        let matches = self
            .store
            .list_questions(&QuestionFilter::containing(term))
            .await?;
        debug!("Search for {:?} matched {} questions", term, matches.len());

        Ok(SearchResponse {
            success: true,
            questions: self.page_of(&matches, page),
            total_questions: matches.len(),
        })
    }

    /// One page of a category's questions; a category without questions
    /// is `NotFound`
    pub async fn questions_by_category(
        &self,
        category: CategoryId,
        page: PageRequest,
    ) -> QuizResult<CategoryQuestionsResponse> {
        let in_category = self
            .store
            .list_questions(&QuestionFilter::in_category(category))
            .await?;
        if in_category.is_empty() {
            return Err(QuizError::category_not_found(category));
        }
        let total_questions = self.store.count_questions().await?;

        Ok(CategoryQuestionsResponse {
            success: true,
            questions: self.page_of(&in_category, page),
            total_questions,
            current_category: category,
        })
    }

    pub async fn update_question(
        &self,
        id: QuestionId,
        update: &QuestionUpdate,
    ) -> QuizResult<UpdatedResponse> {
        update.validate()?;
        let updated = self.store.update_question(id, update).await?;
        info!("Updated question {}", updated.id);

        Ok(UpdatedResponse {
            success: true,
            id: updated.id,
        })
    }

    /// Draw the next unseen question for a quiz session
    pub async fn play(&self, request: &PlayRequest) -> QuizResult<PlayResponse> {
        let category = request
            .quiz_category
            .as_ref()
            .ok_or_else(|| QuizError::InvalidInput("quiz_category is required".to_string()))?;
        let scope = CategoryScope::from_id(category.id);

        let pool = self
            .store
            .list_questions(&QuestionFilter {
                category: scope.category(),
                text_contains: None,
            })
            .await?;
        let excluded: HashSet<QuestionId> = request.previous_questions.iter().copied().collect();

        let drawn = {
            let mut rng = self.rng.lock();
            quiz::draw(scope, &excluded, &pool, &mut **rng).map(Question::format)
        };

        match &drawn {
            Some(question) => debug!("Drew question {} from {}", question.id, scope),
            None => info!("No unseen questions left in {}", scope),
        }

        Ok(PlayResponse { question: drawn })
    }

    pub async fn create_category(&self, kind: &str) -> QuizResult<CategoryResponse> {
        let category = self.store.insert_category(kind).await?;
        info!("Created category {} ({})", category.id, category.kind);

        Ok(CategoryResponse {
            success: true,
            category,
        })
    }

    /// Bulk-load categories and questions
    pub async fn import(&self, request: ImportRequest) -> QuizResult<ImportResponse> {
        let (categories, questions) = self
            .store
            .import(request.categories, request.questions)
            .await?;
        info!(
            "Imported {} categories and {} questions",
            categories.len(),
            questions.len()
        );

        Ok(ImportResponse {
            success: true,
            categories,
            created: questions.iter().map(|question| question.id).collect(),
        })
    }
}
