//! Domain models shared by the store, the search engine and the parser.

pub mod lecture;
pub mod macros;
pub mod schedule;

pub use lecture::*;
pub use schedule::*;

crate::define_key_type!(TableId);
