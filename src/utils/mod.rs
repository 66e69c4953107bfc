//! Utility functions

pub mod nullable;
pub mod time;
pub mod validation;

pub use nullable::null_as_default;
pub use time::{format_duration, now_utc, parse_datetime};
pub use validation::{sanitize_string, validate_language, validate_source_code};
