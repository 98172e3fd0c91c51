/*!
 * Question retrieval and quiz-selection engine.
 *
 * Everything in here is a pure function over records already fetched from
 * a question store:
 * - `paginator`: fixed-size page windows over an ordered sequence
 * - `search`: case-insensitive substring predicate over question text
 * - `selector`: uniform random draw of an unseen question
 */

pub mod paginator;
pub mod search;
pub mod selector;

pub use paginator::{DEFAULT_PAGE_SIZE, PageRequest, paginate};
pub use search::matches;
pub use selector::{CategoryScope, RandomSource, draw};
