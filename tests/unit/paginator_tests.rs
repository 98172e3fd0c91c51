/*!
 * Tests for page windows
 */

use trivia::DEFAULT_PAGE_SIZE;
use trivia::PageRequest;
use trivia::quiz::paginate;

/// Test the three windows over 25 items
#[test]
fn test_paginate_withTwentyFiveItems_shouldSplitIntoThreePages() {
    let items: Vec<u32> = (1..=25).collect();

    assert_eq!(paginate(1, DEFAULT_PAGE_SIZE, &items), &items[0..10]);
    assert_eq!(paginate(2, DEFAULT_PAGE_SIZE, &items), &items[10..20]);
    assert_eq!(paginate(3, DEFAULT_PAGE_SIZE, &items), &items[20..25]);
    assert!(paginate(4, DEFAULT_PAGE_SIZE, &items).is_empty());
}

/// Test that consecutive pages never overlap and cover everything
#[test]
fn test_paginate_consecutivePages_shouldCoverSequenceOnce() {
    let items: Vec<u32> = (0..37).collect();
    let mut seen = Vec::new();

    for page in 1.. {
        let window = paginate(page, 7, &items);
        if window.is_empty() {
            break;
        }
        assert!(window.len() <= 7);
        seen.extend_from_slice(window);
    }

    assert_eq!(seen, items);
}

/// Test non-positive and huge page numbers
#[test]
fn test_paginate_withOutOfRangePages_shouldBeEmpty() {
    let items: Vec<u32> = (0..5).collect();

    assert!(paginate(0, DEFAULT_PAGE_SIZE, &items).is_empty());
    assert!(paginate(-3, DEFAULT_PAGE_SIZE, &items).is_empty());
    assert!(paginate(i64::MAX, DEFAULT_PAGE_SIZE, &items).is_empty());
}

#[test]
fn test_paginate_emptySequence_shouldBeEmpty() {
    let items: Vec<u32> = Vec::new();
    assert!(paginate(1, DEFAULT_PAGE_SIZE, &items).is_empty());
}

#[test]
fn test_pageRequest_withoutPage_shouldDefaultToFirst() {
    assert_eq!(PageRequest::or_first(None), PageRequest::new(1));
    assert_eq!(PageRequest::or_first(Some(4)).page, 4);
    assert_eq!(PageRequest::default().page, 1);
}
