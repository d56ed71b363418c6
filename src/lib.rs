//! dtlocal - timezone-safe `datetime-local` conversion
//!
//! This library converts between the `YYYY-MM-DDTHH:mm` text produced by an
//! `<input type="datetime-local">` form control and UTC timestamps. The text
//! carries no timezone marker, and lenient date parsers (notably on mobile
//! browsers) tend to read it as UTC, silently shifting every submitted
//! date/time by the local offset. The functions here always interpret that
//! format in the local timezone of the running process, and render instants
//! back using local calendar fields so the result can be fed straight into
//! the same kind of form control.
//!
//! # Modules
//!
//! * [`datetime_local`] - Parsing, UTC conversion, and form-text rendering

/// Conversion between `datetime-local` form text and UTC timestamps
pub mod datetime_local;

// Re-export the conversion API for convenient access
pub use datetime_local::{parse_local, to_local_text, to_utc, try_parse_local, DateTimeValue, ParseError};
