/*!
 * Fixed-size page windows over an ordered sequence.
 *
 * Page numbers are 1-based. A window that falls outside the sequence is
 * clamped, so an out-of-range page is empty rather than an error. Page
 * numbers of zero or below also produce an empty page.
 */

/// Questions per page unless configured otherwise
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Requested page, defaulting to the first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
}

impl PageRequest {
    pub fn new(page: i64) -> Self {
        Self { page }
    }

    /// Page 1 when the caller gave none
    pub fn or_first(page: Option<i64>) -> Self {
        Self::new(page.unwrap_or(1))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Return `items[(page - 1) * page_size .. page * page_size]`, clamped to
/// the bounds of `items`.
pub fn paginate<T>(page: i64, page_size: usize, items: &[T]) -> &[T] {
    if page < 1 || page_size == 0 {
        return &[];
    }

    let start = match usize::try_from(page - 1)
        .ok()
        .and_then(|index| index.checked_mul(page_size))
    {
        Some(start) if start < items.len() => start,
        _ => return &[],
    };
    let end = start.saturating_add(page_size).min(items.len());

    &items[start..end]
}
