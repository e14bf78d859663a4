//! # Timetable Planner Backend
//!
//! Core of a weekly course-timetable builder.
//!
//! Users keep several independent weekly tables, search a university lecture
//! catalog with faceted filters, add lectures to a table and drag placed
//! blocks to another day or time slot.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Lectures, days, time ranges and schedule entries
//! - [`parsing`]: The catalog's schedule string format
//! - [`store`]: Per-table schedule state with a single serialized write path
//! - [`placement`]: Grid snapping for drag relocation
//! - [`search`]: Faceted filtering and result paging
//! - [`catalog`]: Memoized async access to the lecture catalog
//! - [`services`]: Drag, search and color flows built on the modules above
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Logging
//!
//! The library logs through the `log` facade. Binaries decide where the
//! records go.

pub mod catalog;
pub mod config;
pub mod models;
pub mod parsing;
pub mod placement;
pub mod search;
pub mod services;
pub mod store;

pub use catalog::{CacheKey, CatalogError, LectureCache};
pub use config::{ConfigError, PlannerConfig};
pub use models::{Day, Lecture, ScheduleEntry, TableId, TimeRange};
pub use store::ScheduleStore;
