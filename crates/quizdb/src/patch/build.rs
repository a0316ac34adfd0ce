//! SET-clause assembly for partial updates.

use super::convert::{BoundValue, ConvertError};
use super::schema::FieldSchema;
use super::value::PatchDocument;
use thiserror::Error;
use tokio_postgres::types::ToSql;

/// Highest placeholder PostgreSQL accepts in one statement.
pub const MAX_PLACEHOLDER: usize = u16::MAX as usize;

/// A field whose value failed its converter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value for {field}: {reason}")]
pub struct FieldError {
    pub field: String,
    #[source]
    pub reason: ConvertError,
}

impl FieldError {
    pub fn new(field: impl Into<String>, reason: ConvertError) -> Self {
        Self {
            field: field.into(),
            reason,
        }
    }
}

/// Why [`build`] produced no assignments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error(transparent)]
    Field(#[from] FieldError),

    /// A field would be numbered outside `1..=MAX_PLACEHOLDER`.
    #[error("placeholder ${index} for {field} is outside 1..={max}", max = MAX_PLACEHOLDER)]
    PlaceholderOutOfRange { field: String, index: usize },
}

/// SET-clause fragments with their parallel bound values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignments {
    fragments: Vec<String>,
    values: Vec<BoundValue>,
    next_index: usize,
}

impl Assignments {
    /// Fragments of the form `column = $N`, in schema order.
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn values(&self) -> &[BoundValue] {
        &self.values
    }

    /// First placeholder index not used by these assignments.
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Fragments joined for use after `SET`.
    pub fn set_clause(&self) -> String {
        self.fragments.join(", ")
    }

    /// Bound values as references for tokio-postgres.
    pub fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.values
            .iter()
            .map(|v| v as &(dyn ToSql + Sync))
            .collect()
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<BoundValue>, usize) {
        (self.fragments, self.values, self.next_index)
    }
}

/// Result of [`build`] when every present field converted.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    Assignments(Assignments),
    /// No key of the document is an updatable field.
    NothingToUpdate,
}

impl BuildOutcome {
    pub fn into_assignments(self) -> Option<Assignments> {
        match self {
            Self::Assignments(a) => Some(a),
            Self::NothingToUpdate => None,
        }
    }
}

/// Build SET-clause fragments for the fields of `input` that `schema` declares.
///
/// Fields are visited in schema order and numbered from `start_index`. Keys
/// unknown to the schema are skipped. The first converter failure aborts the
/// whole build; nothing converted before it is returned. So does a field whose
/// placeholder would fall outside `1..=`[`MAX_PLACEHOLDER`].
///
/// # Example
/// ```ignore
/// let doc = PatchDocument::from_json_str(r#"{"question": "New Q?"}"#)?;
/// match patch::build(&doc, &schema, 1)? {
///     BuildOutcome::Assignments(a) => assert_eq!(a.set_clause(), "question = $1"),
///     BuildOutcome::NothingToUpdate => {}
/// }
/// ```
pub fn build(
    input: &PatchDocument,
    schema: &FieldSchema,
    start_index: usize,
) -> Result<BuildOutcome, BuildError> {
    let mut fragments = Vec::new();
    let mut values = Vec::new();
    let mut index = start_index;

    for field in schema.fields() {
        let Some(raw) = input.get(field.name()) else {
            continue;
        };
        if !(1..=MAX_PLACEHOLDER).contains(&index) {
            return Err(BuildError::PlaceholderOutOfRange {
                field: field.name().to_string(),
                index,
            });
        }
        let value = (field.converter())(raw).map_err(|e| FieldError::new(field.name(), e))?;
        fragments.push(format!("{} = ${}", field.column(), index));
        values.push(value);
        index += 1;
    }

    if fragments.is_empty() {
        return Ok(BuildOutcome::NothingToUpdate);
    }

    Ok(BuildOutcome::Assignments(Assignments {
        fragments,
        values,
        next_index: index,
    }))
}
