pub mod constants;
pub mod error;
pub mod types;
pub mod validator;

pub use error::{Error, Result};
pub use types::*;
pub use validator::{FormatViolation, check_format, classify, validate_entry, validate_format};
