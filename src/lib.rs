pub mod error;
pub mod utils;
pub mod value;
pub mod view;

pub use error::{MissingFieldError, ParseError, TypeError, ValidationError, ViewError};
pub use value::FieldValue;
pub use view::TypedJsonView;
