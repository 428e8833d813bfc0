//! releve-core: canonical transaction schema, budget taxonomy, and the
//! categorization working set.

pub mod taxonomy;
pub mod transaction;
pub mod working_set;

pub use taxonomy::Taxonomy;
pub use transaction::{AccountKind, CANONICAL_COLUMNS, Transaction, TxnKind};
pub use working_set::{EditError, FieldEdit, IncompleteBatch, WorkingSet};
