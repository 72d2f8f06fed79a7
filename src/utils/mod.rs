//! Utility functions

pub mod text;
pub mod time;
pub mod validation;

pub use text::title_case;
pub use time::{format_certificate_date, today_local};
pub use validation::{sanitize_string, validate_admission_number, validate_name};
