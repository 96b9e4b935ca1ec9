use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum ViewError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    MissingField(#[from] MissingFieldError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationError),
}

/// Construction-time failures. Both variants render the same message so that
/// callers see one stable string for "this input is not a usable JSON
/// object"; the diagnostic code tells them apart.
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum ParseError {
    #[error("Bad json object")]
    #[diagnostic(
        code(json_view::invalid_json),
        help("The input text could not be parsed as JSON.")
    )]
    InvalidJson {
        #[source_code]
        src: NamedSource<String>,
        #[label("syntax error reported here")]
        span: SourceSpan,
    },

    #[error("Bad json object")]
    #[diagnostic(
        code(json_view::not_an_object),
        help("The top-level JSON value must be an object, but a {found} was given.")
    )]
    NotAnObject { found: &'static str },

    #[error("Bad json object")]
    #[diagnostic(
        code(json_view::unrepresentable),
        help("The value has no JSON representation: {detail}")
    )]
    Unrepresentable { detail: String },
}

#[derive(Error, Debug, Diagnostic, Clone)]
#[error("\"{field}\" is required")]
#[diagnostic(
    code(json_view::missing_field),
    help("Add the \"{field}\" key to the object, or guard the access with `has`.")
)]
pub struct MissingFieldError {
    pub field: String,
}

/// The field is present but holds the wrong JSON kind for the accessor that
/// was called. `expected` is the kind word as it appears in the message,
/// already suffixed with " or null" for nullable accessors.
#[derive(Error, Debug, Diagnostic, Clone)]
#[error("\"{field}\" must be a {expected}")]
#[diagnostic(
    code(json_view::wrong_type),
    help("The field exists but its value has a different JSON kind.")
)]
pub struct TypeError {
    pub field: String,
    pub expected: String,
}

impl TypeError {
    pub(crate) fn new(field: &str, kind: &str, nullable: bool) -> Self {
        let expected = if nullable {
            format!("{kind} or null")
        } else {
            kind.to_string()
        };
        TypeError {
            field: field.to_string(),
            expected,
        }
    }
}

/// The field has the right kind but fails a semantic constraint.
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum ValidationError {
    #[error("\"{field}\" can't be empty")]
    #[diagnostic(
        code(json_view::empty_string),
        help("An empty string is not accepted for this field.")
    )]
    EmptyString { field: String },

    #[error("\"{field}\" must be greater than zero")]
    #[diagnostic(
        code(json_view::not_greater_than_zero),
        help("Zero and negative values are not accepted for this field.")
    )]
    NotGreaterThanZero { field: String },

    #[error("\"{field}\" does not have a valid email format")]
    #[diagnostic(
        code(json_view::invalid_email),
        help("The value must be a well-formed email address, e.g. \"user@example.com\".")
    )]
    InvalidEmail { field: String },
}
