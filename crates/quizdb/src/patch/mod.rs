//! Partial updates driven by a declared field schema.
//!
//! A client sends a sparse JSON object; only the keys a [`FieldSchema`] declares
//! are turned into `column = $N` assignments, each value validated by the
//! field's [`Converter`] and bound as a parameter. The module never builds or
//! runs a full statement; callers splice [`Assignments::set_clause`] into their
//! own `UPDATE`.
//!
//! ```ignore
//! use quizdb::patch::{self, convert, BuildOutcome, FieldSchema, PatchDocument};
//!
//! let schema = FieldSchema::new()
//!     .field("question", convert::string)
//!     .field("options", convert::string_array);
//!
//! let doc = PatchDocument::from_json_str(r#"{"options": ["A", "B"], "extra": 1}"#)?;
//! if let BuildOutcome::Assignments(set) = patch::build(&doc, &schema, 1)? {
//!     let sql = format!("UPDATE quiz_table SET {} WHERE id = ${}", set.set_clause(), set.next_index());
//! }
//! ```

mod build;
pub mod convert;
mod schema;
mod value;

pub use build::{Assignments, BuildError, BuildOutcome, FieldError, MAX_PLACEHOLDER, build};
pub use convert::{BoundValue, ConvertError, Converter};
pub use schema::{FieldSchema, SchemaField};
pub use value::{PatchDocument, PatchValue};
