//! Lecture catalog access.
//!
//! The catalog is published as two independently fetched JSON documents. The
//! [`LectureCache`] memoizes each document per [`CacheKey`] for the life of the
//! process, collapsing concurrent requests for a key onto one fetch.

pub mod cache;
pub mod error;
pub mod source;

pub use cache::LectureCache;
pub use error::{CatalogError, CatalogResult};
pub use source::{CacheKey, FileSource, LectureSource, StaticSource};
