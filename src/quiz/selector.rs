/*!
 * Random selection of the next unseen quiz question.
 *
 * The draw narrows the pool to the requested category, removes every
 * question the caller has already served, and picks one of the remaining
 * candidates uniformly at random. An empty candidate pool is the normal
 * "quiz complete" outcome and yields `None`.
 */

use rand::Rng;
use std::collections::HashSet;
use std::fmt;

use crate::database::models::{CategoryId, Question, QuestionId};

/// Category id that stands for "every category"
pub const ALL_CATEGORIES: CategoryId = 0;

/// Which questions a quiz draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryScope {
    /// Every question in the store
    All,
    /// Questions in a single category
    Category(CategoryId),
}

impl CategoryScope {
    /// Interpret a category id, treating 0 as "all"
    pub fn from_id(id: CategoryId) -> Self {
        if id == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Category(id)
        }
    }

    pub fn includes(&self, question: &Question) -> bool {
        match self {
            Self::All => true,
            Self::Category(id) => question.category == *id,
        }
    }

    /// Category filter to hand to a store scan
    pub fn category(&self) -> Option<CategoryId> {
        match self {
            Self::All => None,
            Self::Category(id) => Some(*id),
        }
    }
}

impl fmt::Display for CategoryScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Category(id) => write!(f, "category {}", id),
        }
    }
}

/// Source of uniform random indices
///
/// Every `rand::Rng` is a source, so callers can pass `rand::rng()` in
/// production and a seeded `StdRng` or a scripted source in tests.
pub trait RandomSource {
    /// Return an index in `0..len`. `len` is never zero; larger values
    /// are clamped to the last candidate.
    fn pick_index(&mut self, len: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
    fn pick_index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// Draw one unseen question from `pool`, or `None` when the scope is
/// exhausted.
pub fn draw<'a, S: RandomSource + ?Sized>(
    scope: CategoryScope,
    excluded: &HashSet<QuestionId>,
    pool: &'a [Question],
    rng: &mut S,
) -> Option<&'a Question> {
    let candidates: Vec<&Question> = pool
        .iter()
        .filter(|question| scope.includes(question))
        .filter(|question| !excluded.contains(&question.id))
        .collect();

    if candidates.is_empty() {
        return None;
    }

    // Out-of-range indices clamp to the last candidate
    let index = rng.pick_index(candidates.len()).min(candidates.len() - 1);
    Some(candidates[index])
}
