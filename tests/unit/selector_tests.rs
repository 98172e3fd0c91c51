/*!
 * Tests for the quiz draw
 */

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;

use trivia::CategoryScope;
use trivia::quiz::draw;
use trivia::quiz::selector::ALL_CATEGORIES;

use crate::common::{self, ScriptedSource};

#[test]
fn test_categoryScope_fromZero_shouldBeAll() {
    assert_eq!(CategoryScope::from_id(ALL_CATEGORIES), CategoryScope::All);
    assert_eq!(CategoryScope::from_id(3), CategoryScope::Category(3));
    assert_eq!(CategoryScope::All.category(), None);
    assert_eq!(CategoryScope::Category(3).category(), Some(3));
}

/// Test that the draw stays in scope and skips served questions
#[test]
fn test_draw_withScopeAndExclusions_shouldPickUnseenInCategory() {
    let pool = common::sample_questions();
    let excluded: HashSet<i64> = [1, 3].into_iter().collect();
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..50 {
        let drawn = draw(CategoryScope::Category(1), &excluded, &pool, &mut rng)
            .expect("question 2 is still unseen");
        assert_eq!(drawn.id, 2);
    }
}

#[test]
fn test_draw_whenAllServed_shouldReturnNone() {
    let pool = common::sample_questions();
    let excluded: HashSet<i64> = pool.iter().map(|question| question.id).collect();
    let mut rng = StdRng::seed_from_u64(11);

    assert!(draw(CategoryScope::All, &excluded, &pool, &mut rng).is_none());
}

#[test]
fn test_draw_withUnknownCategory_shouldReturnNone() {
    let pool = common::sample_questions();
    let mut rng = StdRng::seed_from_u64(11);

    assert!(draw(CategoryScope::Category(99), &HashSet::new(), &pool, &mut rng).is_none());
}

/// Excluded ids that are not in the pool are ignored
#[test]
fn test_draw_withForeignExclusions_shouldStillDraw() {
    let pool = common::sample_questions();
    let excluded: HashSet<i64> = [100, 200].into_iter().collect();
    let mut source = ScriptedSource::new([0]);

    let drawn = draw(CategoryScope::Category(2), &excluded, &pool, &mut source);

    assert_eq!(drawn.map(|question| question.id), Some(4));
}

/// The source indexes into the filtered candidates in pool order
#[test]
fn test_draw_withScriptedSource_shouldIndexCandidates() {
    let pool = common::sample_questions();
    let excluded: HashSet<i64> = [2].into_iter().collect();
    let mut source = ScriptedSource::new([0, 1]);

    let first = draw(CategoryScope::Category(1), &excluded, &pool, &mut source);
    let second = draw(CategoryScope::Category(1), &excluded, &pool, &mut source);

    assert_eq!(first.map(|question| question.id), Some(1));
    assert_eq!(second.map(|question| question.id), Some(3));
}

/// Two sources with the same seed draw the same sequence
#[test]
fn test_draw_withSameSeed_shouldBeReproducible() {
    let pool = common::sample_questions();
    let mut left = StdRng::seed_from_u64(2024);
    let mut right = StdRng::seed_from_u64(2024);

    for _ in 0..20 {
        let a = draw(CategoryScope::All, &HashSet::new(), &pool, &mut left).map(|q| q.id);
        let b = draw(CategoryScope::All, &HashSet::new(), &pool, &mut right).map(|q| q.id);
        assert_eq!(a, b);
    }
}
