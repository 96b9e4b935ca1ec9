use crate::view::TypedJsonView;
use serde_json::Value;

/// A decoded JSON value as stored inside a view: a closed variant over the
/// JSON kinds, with the integer/float split taken from the parser's own
/// classification and every object — at any depth, including inside arrays —
/// already replaced by a [`TypedJsonView`].
#[derive(Debug, PartialEq, Clone)]
pub enum FieldValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<FieldValue>),
    Object(TypedJsonView),
}

impl FieldValue {
    /// The lowercase kind word used in error messages.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Boolean(_) => "boolean",
            FieldValue::Integer(_) => "integer",
            FieldValue::Float(_) => "float",
            FieldValue::String(_) => "string",
            FieldValue::Array(_) => "array",
            FieldValue::Object(_) => "object",
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    #[must_use]
    pub fn is_boolean(&self) -> bool {
        matches!(self, FieldValue::Boolean(_))
    }

    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(self, FieldValue::Integer(_))
    }

    #[must_use]
    pub fn is_float(&self) -> bool {
        matches!(self, FieldValue::Float(_))
    }

    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, FieldValue::String(_))
    }

    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, FieldValue::Array(_))
    }

    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, FieldValue::Object(_))
    }

    /// Borrow the string content, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the element sequence, if this is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the nested view, if this value was a JSON object.
    #[must_use]
    pub fn as_object(&self) -> Option<&TypedJsonView> {
        match self {
            FieldValue::Object(view) => Some(view),
            _ => None,
        }
    }

    /// Integer coercion used by the integer accessors: true integers pass
    /// through, integer-formatted strings parse ("0" is a valid integer).
    /// Floats and everything else are rejected. The float accessors do not
    /// coerce at all.
    pub(crate) fn integer_value(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            FieldValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Boolean(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Integer(i)
                } else {
                    // Real floats and u64s beyond i64::MAX both land here;
                    // as_f64 is total for serde_json numbers without the
                    // arbitrary_precision feature.
                    FieldValue::Float(n.as_f64().unwrap_or_default())
                }
            }
            Value::String(s) => FieldValue::String(s),
            Value::Array(items) => {
                FieldValue::Array(items.into_iter().map(FieldValue::from).collect())
            }
            Value::Object(map) => FieldValue::Object(TypedJsonView::from_map(map)),
        }
    }
}

/// Kind word for a raw parser value, for diagnostics on construction.
pub(crate) fn json_kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
