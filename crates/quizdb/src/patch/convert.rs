//! Per-field converters and the typed values they produce.

use super::value::PatchValue;
use bytes::BytesMut;
use thiserror::Error;
use tokio_postgres::types::{IsNull, ToSql, Type};

/// Validates a raw value and normalizes it into a bindable [`BoundValue`].
pub type Converter = fn(&PatchValue) -> Result<BoundValue, ConvertError>;

/// Why a converter rejected a value.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("not a string")]
    NotAString,
    #[error("not an array")]
    NotAnArray,
    #[error("element not a string")]
    ElementNotAString,
}

/// A storage-ready value bound as a statement parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundValue {
    /// Binds to `text` / `varchar` columns.
    Text(String),
    /// Binds to `text[]` columns.
    TextArray(Vec<String>),
}

impl ToSql for BoundValue {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        match self {
            Self::Text(s) if <String as ToSql>::accepts(ty) => s.to_sql(ty, out),
            Self::TextArray(items) if <Vec<String> as ToSql>::accepts(ty) => items.to_sql(ty, out),
            Self::Text(_) => Err(format!("cannot bind a string to a column of type {ty}").into()),
            Self::TextArray(_) => {
                Err(format!("cannot bind a string array to a column of type {ty}").into())
            }
        }
    }

    fn accepts(ty: &Type) -> bool {
        <String as ToSql>::accepts(ty) || <Vec<String> as ToSql>::accepts(ty)
    }

    tokio_postgres::types::to_sql_checked!();
}

/// Accepts exactly a string.
pub fn string(value: &PatchValue) -> Result<BoundValue, ConvertError> {
    match value {
        PatchValue::String(s) => Ok(BoundValue::Text(s.clone())),
        _ => Err(ConvertError::NotAString),
    }
}

/// Accepts an array of strings, including the empty array.
pub fn string_array(value: &PatchValue) -> Result<BoundValue, ConvertError> {
    match value {
        PatchValue::StringArray(items) => Ok(BoundValue::TextArray(items.clone())),
        PatchValue::MixedArray => Err(ConvertError::ElementNotAString),
        _ => Err(ConvertError::NotAnArray),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_rejects_everything_but_strings() {
        assert_eq!(
            string(&PatchValue::from("New Q?")),
            Ok(BoundValue::Text("New Q?".into()))
        );
        assert_eq!(string(&PatchValue::Null), Err(ConvertError::NotAString));
        assert_eq!(string(&PatchValue::Other("number")), Err(ConvertError::NotAString));
        assert_eq!(
            string(&PatchValue::from(vec!["a"])),
            Err(ConvertError::NotAString)
        );
    }

    #[test]
    fn string_array_distinguishes_failures() {
        assert_eq!(
            string_array(&PatchValue::from(vec!["A", "B"])),
            Ok(BoundValue::TextArray(vec!["A".into(), "B".into()]))
        );
        assert_eq!(
            string_array(&PatchValue::MixedArray),
            Err(ConvertError::ElementNotAString)
        );
        assert_eq!(
            string_array(&PatchValue::from("not-an-array")),
            Err(ConvertError::NotAnArray)
        );
        assert_eq!(string_array(&PatchValue::Null), Err(ConvertError::NotAnArray));
    }

    #[test]
    fn reasons_render_as_plain_text() {
        assert_eq!(ConvertError::NotAString.to_string(), "not a string");
        assert_eq!(ConvertError::NotAnArray.to_string(), "not an array");
        assert_eq!(
            ConvertError::ElementNotAString.to_string(),
            "element not a string"
        );
    }

    #[test]
    fn empty_array_is_a_value() {
        assert_eq!(
            string_array(&PatchValue::StringArray(Vec::new())),
            Ok(BoundValue::TextArray(Vec::new()))
        );
    }

    #[test]
    fn bound_value_accepts_text_and_text_array() {
        assert!(<BoundValue as ToSql>::accepts(&Type::TEXT));
        assert!(<BoundValue as ToSql>::accepts(&Type::VARCHAR));
        assert!(<BoundValue as ToSql>::accepts(&Type::TEXT_ARRAY));
        assert!(!<BoundValue as ToSql>::accepts(&Type::INT4));
    }

    #[test]
    fn bound_text_encodes_like_string() {
        let mut ours = BytesMut::new();
        let mut plain = BytesMut::new();
        BoundValue::Text("hello".into())
            .to_sql(&Type::TEXT, &mut ours)
            .unwrap();
        "hello".to_string().to_sql(&Type::TEXT, &mut plain).unwrap();
        assert_eq!(ours, plain);
    }
}
