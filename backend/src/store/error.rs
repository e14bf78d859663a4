//! Error types for building schedule maps.

use super::TableId;

/// Errors raised when seeding a [`super::ScheduleMap`].
///
/// Mutations on an existing map never fail; unknown references are ignored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("a schedule map needs at least one table")]
    NoTables,
    #[error("duplicate table id: {0}")]
    DuplicateTable(TableId),
}
