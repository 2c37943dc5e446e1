//! Data model for batch scoring.
//!
//! All entities here are batch-scoped: created when a batch starts,
//! dropped once the ranked table and report are returned. Nothing is
//! shared or mutated across batches.

mod fields;
mod record;
mod table;

pub use fields::Field;
pub use record::{ProductRecord, ScoredRecord};
pub use table::{RawCell, RawTable};
