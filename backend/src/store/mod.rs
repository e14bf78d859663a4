//! Per-table schedule state.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  ScheduleStore (handle.rs)                                │
//! │  - single serialized write path                           │
//! │  - per-table watch channels, notified on reference change │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │  old map ──► reduce ──► new map
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  ScheduleMap + Action (state.rs)                          │
//! │  - pure, returns None when nothing changes                │
//! │  - untouched tables and entries keep their Arc            │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod handle;
pub mod state;


pub use error::StoreError;
pub use handle::ScheduleStore;
pub use state::{reduce, Action, EntryRef, ScheduleMap, Table, TableEntries};

pub use crate::models::TableId;
