//! Ordered declarations of updatable fields.

use super::convert::Converter;
use crate::error::{QuizError, QuizResult};
use crate::ident::Ident;

/// One updatable field: the document key, its rendered column, and its converter.
#[derive(Debug, Clone)]
pub struct SchemaField {
    name: String,
    column: String,
    convert: Converter,
}

impl SchemaField {
    /// Key looked up in the partial update document.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column as rendered into an assignment fragment.
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn converter(&self) -> Converter {
        self.convert
    }
}

/// The ordered set of fields a partial update may touch.
///
/// Fields are visited in registration order, which makes fragment order and
/// placeholder numbering part of the schema's contract. Build it once and
/// share it; it is never mutated after construction.
///
/// ```ignore
/// static SCHEMA: LazyLock<FieldSchema> = LazyLock::new(|| {
///     FieldSchema::new()
///         .field("question", convert::string)
///         .field("options", convert::string_array)
/// });
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldSchema {
    fields: Vec<SchemaField>,
}

impl FieldSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a field.
    ///
    /// # Panics
    /// Panics if `name` is not a single valid SQL identifier or is already registered.
    /// Schemas are declared in code, so this is a developer error; use
    /// [`FieldSchema::try_field`] for names that come from configuration.
    pub fn field(self, name: &str, convert: Converter) -> Self {
        self.try_field(name, convert)
            .unwrap_or_else(|e| panic!("invalid field schema entry {name:?}: {e}"))
    }

    /// Register a field, rejecting invalid, qualified or duplicate names.
    pub fn try_field(mut self, name: &str, convert: Converter) -> QuizResult<Self> {
        let ident = Ident::parse(name)?;
        // `a.b = $1` would assign a composite subfield, not a column.
        if ident.parts().len() != 1 {
            return Err(QuizError::validation(format!(
                "field '{name}' must be a single column name"
            )));
        }
        let column = ident.to_sql();
        if self.fields.iter().any(|f| f.name == name) {
            return Err(QuizError::validation(format!(
                "field '{name}' is declared twice"
            )));
        }
        self.fields.push(SchemaField {
            name: name.to_string(),
            column,
            convert,
        });
        Ok(self)
    }

    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
