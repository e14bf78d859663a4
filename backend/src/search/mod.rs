//! Lecture search: faceted filtering and incremental result paging.
//!
//! - [`options`]: the facet set and how a search scope seeds it
//! - [`filter`]: evaluate facets over a pre-parsed catalog
//! - [`pagination`]: reveal a growing prefix of the filtered list

pub mod filter;
pub mod options;
pub mod pagination;


pub use filter::{all_majors, CatalogIndex, FilterResult};
pub use options::{SearchChange, SearchOption, SearchScope};
pub use pagination::{PaginationWindow, DEFAULT_PAGE_SIZE};
