use std::collections::BTreeMap;
use std::str::FromStr;

use miette::NamedSource;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{MissingFieldError, ParseError, TypeError, ValidationError, ViewError};
use crate::utils::{is_valid_email, offset_of_line_column};
use crate::value::{json_kind_name, FieldValue};

/// An immutable view over one decoded JSON object, exposing typed, validated
/// accessors for its fields.
///
/// Construction eagerly materializes the whole tree: nested objects become
/// nested views, array elements that are objects become views element by
/// element, scalars are stored unchanged. After construction nothing is ever
/// added, removed, or mutated, so a single view can be shared freely across
/// readers.
///
/// ```
/// use typed_json_view::TypedJsonView;
///
/// let view = TypedJsonView::parse(r#"{"name": "Ada", "logins": 3}"#)?;
/// assert_eq!(view.get_string("name")?, "Ada");
/// assert_eq!(view.get_integer("logins")?, 3);
/// # Ok::<(), typed_json_view::ViewError>(())
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct TypedJsonView {
    fields: BTreeMap<String, FieldValue>,
}

impl TypedJsonView {
    /// Parses JSON text and wraps the result.
    ///
    /// # Errors
    /// Returns a `ParseError` if the text is not valid JSON or the top-level
    /// value is not an object.
    pub fn parse(text: &str) -> Result<Self, ViewError> {
        log::trace!("parsing {} bytes of json input", text.len());
        let value: Value = serde_json::from_str(text).map_err(|err| {
            let at = offset_of_line_column(text, err.line(), err.column());
            ParseError::InvalidJson {
                src: NamedSource::new("input", text.to_string()),
                span: (at, usize::from(at < text.len())).into(),
            }
        })?;
        Self::from_value(value)
    }

    /// Wraps an already-decoded JSON value.
    ///
    /// # Errors
    /// Returns a `ParseError` if the value is not an object.
    pub fn from_value(value: Value) -> Result<Self, ViewError> {
        match value {
            Value::Object(map) => Ok(Self::from_map(map)),
            other => Err(ParseError::NotAnObject {
                found: json_kind_name(&other),
            }
            .into()),
        }
    }

    /// Builds a view from any serializable value, going through the JSON
    /// data model.
    ///
    /// # Errors
    /// Returns a `ParseError` if the value cannot be represented as JSON or
    /// does not serialize to an object.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self, ViewError> {
        let value = serde_json::to_value(value).map_err(|err| ParseError::Unrepresentable {
            detail: err.to_string(),
        })?;
        Self::from_value(value)
    }

    pub(crate) fn from_map(map: serde_json::Map<String, Value>) -> Self {
        let fields: BTreeMap<String, FieldValue> = map
            .into_iter()
            .map(|(key, value)| (key, FieldValue::from(value)))
            .collect();
        log::trace!("materialized view with {} fields", fields.len());
        TypedJsonView { fields }
    }

    /// Whether the field exists, regardless of its kind or value.
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Number of top-level fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over the field names in sorted order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Looks up a field that must be present. Every typed accessor funnels
    /// through this, so absence is always reported the same way before any
    /// kind check runs.
    ///
    /// # Errors
    /// Returns a `MissingFieldError` if the field is absent.
    pub fn get_required_field(&self, field: &str) -> Result<&FieldValue, ViewError> {
        self.fields.get(field).ok_or_else(|| {
            MissingFieldError {
                field: field.to_string(),
            }
            .into()
        })
    }

    // Steps 1 and 2 of the accessor protocol: fetch the raw value, then let
    // a JSON null through untouched when the field was declared nullable.
    fn fetch(&self, field: &str, nullable: bool) -> Result<Option<&FieldValue>, ViewError> {
        let value = self.get_required_field(field)?;
        if nullable && value.is_null() {
            return Ok(None);
        }
        Ok(Some(value))
    }

    fn wrong_type(field: &str, kind: &str, nullable: bool) -> ViewError {
        TypeError::new(field, kind, nullable).into()
    }

    /// The field as an array of values.
    ///
    /// # Errors
    /// `MissingFieldError` if absent, `TypeError` if not an array.
    pub fn get_array(&self, field: &str) -> Result<&[FieldValue], ViewError> {
        match self.fetch(field, false)? {
            Some(FieldValue::Array(items)) => Ok(items.as_slice()),
            _ => Err(Self::wrong_type(field, "array", false)),
        }
    }

    /// Nullable form of [`get_array`](Self::get_array): a JSON null yields `None`.
    ///
    /// # Errors
    /// `MissingFieldError` if absent, `TypeError` if neither an array nor null.
    pub fn get_nullable_array(&self, field: &str) -> Result<Option<&[FieldValue]>, ViewError> {
        match self.fetch(field, true)? {
            None => Ok(None),
            Some(FieldValue::Array(items)) => Ok(Some(items.as_slice())),
            Some(_) => Err(Self::wrong_type(field, "array", true)),
        }
    }

    /// The field as a nested view.
    ///
    /// # Errors
    /// `MissingFieldError` if absent, `TypeError` if not an object.
    pub fn get_object(&self, field: &str) -> Result<&TypedJsonView, ViewError> {
        match self.fetch(field, false)? {
            Some(FieldValue::Object(view)) => Ok(view),
            _ => Err(Self::wrong_type(field, "object", false)),
        }
    }

    /// Nullable form of [`get_object`](Self::get_object).
    ///
    /// # Errors
    /// `MissingFieldError` if absent, `TypeError` if neither an object nor null.
    pub fn get_nullable_object(&self, field: &str) -> Result<Option<&TypedJsonView>, ViewError> {
        match self.fetch(field, true)? {
            None => Ok(None),
            Some(FieldValue::Object(view)) => Ok(Some(view)),
            Some(_) => Err(Self::wrong_type(field, "object", true)),
        }
    }

    /// The field as a string.
    ///
    /// # Errors
    /// `MissingFieldError` if absent, `TypeError` if not a string.
    pub fn get_string(&self, field: &str) -> Result<&str, ViewError> {
        match self.fetch(field, false)? {
            Some(FieldValue::String(s)) => Ok(s.as_str()),
            _ => Err(Self::wrong_type(field, "string", false)),
        }
    }

    /// Nullable form of [`get_string`](Self::get_string).
    ///
    /// # Errors
    /// `MissingFieldError` if absent, `TypeError` if neither a string nor null.
    pub fn get_nullable_string(&self, field: &str) -> Result<Option<&str>, ViewError> {
        match self.fetch(field, true)? {
            None => Ok(None),
            Some(FieldValue::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(Self::wrong_type(field, "string", true)),
        }
    }

    /// The field as a string that must not be empty.
    ///
    /// # Errors
    /// `MissingFieldError` if absent, `TypeError` if not a string,
    /// `ValidationError` if the string is empty.
    pub fn get_non_empty_string(&self, field: &str) -> Result<&str, ViewError> {
        let value = self.get_string(field)?;
        if value.is_empty() {
            return Err(ValidationError::EmptyString {
                field: field.to_string(),
            }
            .into());
        }
        Ok(value)
    }

    /// Nullable form of [`get_non_empty_string`](Self::get_non_empty_string);
    /// null passes through, an empty string still fails.
    ///
    /// # Errors
    /// `MissingFieldError` if absent, `TypeError` if neither a string nor
    /// null, `ValidationError` if the string is empty.
    pub fn get_nullable_non_empty_string(
        &self,
        field: &str,
    ) -> Result<Option<&str>, ViewError> {
        match self.get_nullable_string(field)? {
            None => Ok(None),
            Some(s) if s.is_empty() => Err(ValidationError::EmptyString {
                field: field.to_string(),
            }
            .into()),
            Some(s) => Ok(Some(s)),
        }
    }

    /// The field as a float. The check is strict: integers and numeric
    /// strings are not floats.
    ///
    /// # Errors
    /// `MissingFieldError` if absent, `TypeError` if not a float.
    pub fn get_float(&self, field: &str) -> Result<f64, ViewError> {
        match self.fetch(field, false)? {
            Some(FieldValue::Float(f)) => Ok(*f),
            _ => Err(Self::wrong_type(field, "float", false)),
        }
    }

    /// Nullable form of [`get_float`](Self::get_float).
    ///
    /// # Errors
    /// `MissingFieldError` if absent, `TypeError` if neither a float nor null.
    pub fn get_nullable_float(&self, field: &str) -> Result<Option<f64>, ViewError> {
        match self.fetch(field, true)? {
            None => Ok(None),
            Some(FieldValue::Float(f)) => Ok(Some(*f)),
            Some(_) => Err(Self::wrong_type(field, "float", true)),
        }
    }

    /// The field as a float that must be strictly positive.
    ///
    /// # Errors
    /// `MissingFieldError` if absent, `TypeError` if not a float,
    /// `ValidationError` if the value is zero or negative.
    pub fn get_float_greater_than_zero(&self, field: &str) -> Result<f64, ViewError> {
        let value = self.get_float(field)?;
        if value > 0.0 {
            Ok(value)
        } else {
            Err(ValidationError::NotGreaterThanZero {
                field: field.to_string(),
            }
            .into())
        }
    }

    /// Nullable form of
    /// [`get_float_greater_than_zero`](Self::get_float_greater_than_zero);
    /// the comparison is skipped entirely when the value is null.
    ///
    /// # Errors
    /// `MissingFieldError` if absent, `TypeError` if neither a float nor
    /// null, `ValidationError` if the value is zero or negative.
    pub fn get_nullable_float_greater_than_zero(
        &self,
        field: &str,
    ) -> Result<Option<f64>, ViewError> {
        match self.get_nullable_float(field)? {
            None => Ok(None),
            Some(value) if value > 0.0 => Ok(Some(value)),
            Some(_) => Err(ValidationError::NotGreaterThanZero {
                field: field.to_string(),
            }
            .into()),
        }
    }

    /// The field as an integer. The check is coercive: true integers and
    /// integer-formatted strings both qualify, and `"0"` is a valid integer.
    ///
    /// # Errors
    /// `MissingFieldError` if absent, `TypeError` if the value does not
    /// parse as an integer.
    pub fn get_integer(&self, field: &str) -> Result<i64, ViewError> {
        match self.fetch(field, false)?.and_then(FieldValue::integer_value) {
            Some(i) => Ok(i),
            None => Err(Self::wrong_type(field, "integer", false)),
        }
    }

    /// Nullable form of [`get_integer`](Self::get_integer).
    ///
    /// # Errors
    /// `MissingFieldError` if absent, `TypeError` if the value is neither an
    /// integer nor null.
    pub fn get_nullable_integer(&self, field: &str) -> Result<Option<i64>, ViewError> {
        match self.fetch(field, true)? {
            None => Ok(None),
            Some(value) => match value.integer_value() {
                Some(i) => Ok(Some(i)),
                None => Err(Self::wrong_type(field, "integer", true)),
            },
        }
    }

    /// The field as an integer that must be strictly positive.
    ///
    /// # Errors
    /// `MissingFieldError` if absent, `TypeError` if not an integer,
    /// `ValidationError` if the value is zero or negative.
    pub fn get_integer_greater_than_zero(&self, field: &str) -> Result<i64, ViewError> {
        let value = self.get_integer(field)?;
        if value > 0 {
            Ok(value)
        } else {
            Err(ValidationError::NotGreaterThanZero {
                field: field.to_string(),
            }
            .into())
        }
    }

    /// Nullable form of
    /// [`get_integer_greater_than_zero`](Self::get_integer_greater_than_zero);
    /// the comparison is skipped entirely when the value is null.
    ///
    /// # Errors
    /// `MissingFieldError` if absent, `TypeError` if the value is neither an
    /// integer nor null, `ValidationError` if the value is zero or negative.
    pub fn get_nullable_integer_greater_than_zero(
        &self,
        field: &str,
    ) -> Result<Option<i64>, ViewError> {
        match self.get_nullable_integer(field)? {
            None => Ok(None),
            Some(value) if value > 0 => Ok(Some(value)),
            Some(_) => Err(ValidationError::NotGreaterThanZero {
                field: field.to_string(),
            }
            .into()),
        }
    }

    /// The field as a boolean literal. No truthiness: `1` and `"true"` are
    /// not booleans.
    ///
    /// # Errors
    /// `MissingFieldError` if absent, `TypeError` if not a boolean.
    pub fn get_boolean(&self, field: &str) -> Result<bool, ViewError> {
        match self.fetch(field, false)? {
            Some(FieldValue::Boolean(b)) => Ok(*b),
            _ => Err(Self::wrong_type(field, "boolean", false)),
        }
    }

    /// Nullable form of [`get_boolean`](Self::get_boolean).
    ///
    /// # Errors
    /// `MissingFieldError` if absent, `TypeError` if neither a boolean nor null.
    pub fn get_nullable_boolean(&self, field: &str) -> Result<Option<bool>, ViewError> {
        match self.fetch(field, true)? {
            None => Ok(None),
            Some(FieldValue::Boolean(b)) => Ok(Some(*b)),
            Some(_) => Err(Self::wrong_type(field, "boolean", true)),
        }
    }

    /// The field as a string holding a well-formed email address.
    ///
    /// # Errors
    /// `MissingFieldError` if absent, `TypeError` if not a string,
    /// `ValidationError` if the string is not a valid email address.
    pub fn get_email(&self, field: &str) -> Result<&str, ViewError> {
        let value = self.get_string(field)?;
        if is_valid_email(value) {
            Ok(value)
        } else {
            Err(ValidationError::InvalidEmail {
                field: field.to_string(),
            }
            .into())
        }
    }

    /// Nullable form of [`get_email`](Self::get_email).
    ///
    /// # Errors
    /// `MissingFieldError` if absent, `TypeError` if neither a string nor
    /// null, `ValidationError` if the string is not a valid email address.
    pub fn get_nullable_email(&self, field: &str) -> Result<Option<&str>, ViewError> {
        match self.get_nullable_string(field)? {
            None => Ok(None),
            Some(s) if is_valid_email(s) => Ok(Some(s)),
            Some(_) => Err(ValidationError::InvalidEmail {
                field: field.to_string(),
            }
            .into()),
        }
    }
}

impl FromStr for TypedJsonView {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for TypedJsonView {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}
