//! Search module.
//!
//! Contains the query mini-language, the asset predicate, pagination state
//! and the feed controller that ties them to a catalog source.

mod feed;
mod filter;
mod query;
mod results;

pub use feed::{CatalogFeed, FeedConfig, FeedPhase};
pub use filter::{matches, FileClass};
pub use query::{tokenize, FieldFilters, ParsedQuery};
pub use results::{PageState, PageView, DEFAULT_PAGE_SIZE};
