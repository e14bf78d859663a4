//! Service layer composing the store, catalog and search modules.
//!
//! Services own no state of their own beyond handles; they orchestrate the
//! pure modules into the flows the interaction layer drives.

pub mod drag;
pub mod palette;
pub mod search_session;

pub use drag::{DragController, DragOutcome};
pub use palette::{LecturePalette, LECTURE_COLORS};
pub use search_session::{CatalogState, SearchSession};
