//! # recordset - record collection utilities
//!
//! Helper routines for a platform-managed object/relational layer:
//!
//! - **Extraction**: collect identifier or field values from collections of
//!   generic records ([`extract_ids`], [`extract_ids_from`],
//!   [`extract_values`])
//! - **Junction uniqueness**: detect duplicate relationship records linking
//!   the same pair of parent entities and annotate the offenders
//!   ([`check_junction_uniqueness`])
//! - **Rollup deltas**: compute per-parent net numeric changes from a
//!   new-state/old-state diff of child records
//!   ([`summarize_changes_on_parent_value`])
//!
//! Every routine is a stateless, synchronous transformation over in-memory
//! record collections; the only external touch point is the grouped-count
//! query behind the [`JunctionStore`] trait.
//!
//! ## Usage
//!
//! ```rust
//! use recordset::{
//!     summarize_changes_on_parent_value, FieldValue, Record, RecordId,
//! };
//!
//! let new_state = vec![Record::new("Session__c", RecordId::new("c1"))
//!     .with_field("Workshop__c", FieldValue::Id(RecordId::new("w1")))
//!     .with_field("Hours__c", 3.0)];
//!
//! let deltas = summarize_changes_on_parent_value(
//!     Some(&new_state),
//!     None,
//!     "Hours__c",
//!     "Workshop__c",
//! )?;
//! assert_eq!(deltas.get(&RecordId::new("w1")), Some(&3.0));
//! # Ok::<(), recordset::RecordError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extract;
pub mod junction;
pub mod record;
pub mod rollup;
pub mod storage;
pub mod value;

// Re-export primary types and operations at crate root for convenience
pub use error::{RecordError, RecordResult};
pub use extract::{extract_ids, extract_ids_from, extract_values};
pub use junction::{check_junction_uniqueness, DUPLICATE_JUNCTION_MESSAGE};
pub use record::{FieldDescriptor, FieldRef, Record, RecordId};
pub use rollup::summarize_changes_on_parent_value;
pub use storage::{GroupedCount, JunctionStore, MemoryJunctionStore, StorageError};
pub use value::FieldValue;
