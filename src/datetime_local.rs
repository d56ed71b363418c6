//! Conversion between `datetime-local` form text and UTC timestamps
//!
//! A `datetime-local` form control produces strings of the form
//! `YYYY-MM-DDTHH:mm` with no timezone attached. These must always be
//! interpreted in the observer's local timezone; reading them as UTC shifts
//! every submitted date/time by the local offset. [`parse_local`] and
//! [`to_utc`] handle the form-to-backend direction, [`to_local_text`] the
//! backend-to-form direction.

use chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

/// Lexical format produced and consumed by `<input type="datetime-local">`
pub const DATETIME_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Failure modes of the `datetime-local` parse path.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("empty input")]
    Empty,

    #[error("non-numeric field in '{0}'")]
    NonNumeric(String),

    #[error("invalid calendar date/time: '{0}'")]
    InvalidCalendar(String),

    #[error("local time '{0}' does not exist (skipped by a timezone transition)")]
    Skipped(String),

    #[error("not a recognized date/time: '{0}'")]
    Unrecognized(String),
}

/// Parse a `datetime-local` string as a LOCAL date/time.
///
/// # Arguments
/// * `text` - The string from an `<input type="datetime-local">` control
///
/// # Returns
/// * `Result<DateTime<Local>, ParseError>` - Parsed instant or the reason it was rejected
pub fn try_parse_local(text: &str) -> Result<DateTime<Local>, ParseError> {
    if text.is_empty() {
        return Err(ParseError::Empty);
    }

    match text.split_once('T') {
        Some((date, time)) if !date.is_empty() && !time.is_empty() => parse_wall_clock(text, date, time),
        // No usable `T` split; hand the raw string to the degraded
        // best-effort parser. Its timezone interpretation is NOT local.
        _ => parse_fallback(text),
    }
}

/// Parse a `datetime-local` string as a LOCAL date/time, absorbing failures.
///
/// Failures are logged and surfaced as `None`; this function never panics.
/// Use [`try_parse_local`] to observe the failure taxonomy instead.
pub fn parse_local(text: &str) -> Option<DateTime<Local>> {
    match try_parse_local(text) {
        Ok(dt) => Some(dt),
        // Absent input is an ordinary state for a form control, not a diagnostic.
        Err(ParseError::Empty) => None,
        Err(e) => {
            log::warn!("Error parsing local datetime: {}", e);
            None
        }
    }
}

/// Convert a `datetime-local` string to a UTC ISO-8601 string.
///
/// The local-timezone offset in effect at that specific wall-clock moment is
/// applied, so the result is correct across DST transitions. The rendering
/// matches JavaScript's `Date.toISOString()`: millisecond precision with a
/// `Z` suffix.
pub fn to_utc(text: &str) -> Option<String> {
    parse_local(text).map(|dt| dt.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Input accepted by [`to_local_text`]: an instant in either timezone, a
/// text form convertible to one, or nothing at all.
#[derive(Debug, Clone, Copy)]
pub enum DateTimeValue<'a> {
    Local(DateTime<Local>),
    Utc(DateTime<Utc>),
    Text(&'a str),
    Absent,
}

impl<'a> From<DateTime<Local>> for DateTimeValue<'a> {
    fn from(dt: DateTime<Local>) -> Self {
        DateTimeValue::Local(dt)
    }
}

impl<'a> From<DateTime<Utc>> for DateTimeValue<'a> {
    fn from(dt: DateTime<Utc>) -> Self {
        DateTimeValue::Utc(dt)
    }
}

impl<'a> From<&'a str> for DateTimeValue<'a> {
    fn from(text: &'a str) -> Self {
        DateTimeValue::Text(text)
    }
}

impl<'a> From<&'a String> for DateTimeValue<'a> {
    fn from(text: &'a String) -> Self {
        DateTimeValue::Text(text)
    }
}

impl<'a, T: Into<DateTimeValue<'a>>> From<Option<T>> for DateTimeValue<'a> {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(DateTimeValue::Absent)
    }
}

/// Render an instant (or a text form convertible to one) as `YYYY-MM-DDTHH:mm`.
///
/// The output uses the LOCAL calendar fields of the instant, which is what
/// makes it safe to assign to a `datetime-local` form control regardless of
/// the value's original timezone. Unconvertible input yields the empty
/// string, never an error: callers feed the result straight into a form
/// control value and cannot handle anything else.
pub fn to_local_text<'a>(value: impl Into<DateTimeValue<'a>>) -> String {
    let local = match value.into() {
        DateTimeValue::Local(dt) => Some(dt),
        DateTimeValue::Utc(dt) => Some(dt.with_timezone(&Local)),
        DateTimeValue::Text(text) => parse_text_value(text),
        DateTimeValue::Absent => None,
    };

    match local {
        Some(dt) => dt.format(DATETIME_LOCAL_FORMAT).to_string(),
        None => String::new(),
    }
}

/// Parse the text input of [`to_local_text`].
///
/// Persisted timestamps coming back from a backend are offset-qualified
/// (RFC 3339, usually `Z`-suffixed) and must be tried first: the lenient
/// `datetime-local` split would otherwise read their calendar fields as
/// local time.
fn parse_text_value(text: &str) -> Option<DateTime<Local>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Local));
    }
    parse_local(text)
}

/// Parse pre-split `datetime-local` segments as a local wall-clock time.
fn parse_wall_clock(raw: &str, date: &str, time: &str) -> Result<DateTime<Local>, ParseError> {
    let mut date_fields = date.split('-');
    let year: i32 = num_field(raw, date_fields.next())?;
    let month: u32 = num_field(raw, date_fields.next())?;
    let day: u32 = num_field(raw, date_fields.next())?;

    // A trailing seconds component (some browsers emit one) is ignored.
    let mut time_fields = time.split(':');
    let hour: u32 = num_field(raw, time_fields.next())?;
    let minute: u32 = num_field(raw, time_fields.next())?;

    // Checked construction: out-of-range components (month 13, Feb 30,
    // hour 25) are rejected here rather than wrapping to an adjacent date.
    let naive = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .ok_or_else(|| ParseError::InvalidCalendar(raw.to_string()))?;

    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt),
        // A fall-back transition repeats this wall-clock time; taking the
        // earlier candidate keeps repeated parses deterministic.
        LocalResult::Ambiguous(earlier, _) => Ok(earlier),
        LocalResult::None => Err(ParseError::Skipped(raw.to_string())),
    }
}

/// Best-effort parse for input that did not split on `T`.
///
/// Only the offset-qualified branch is timezone-correct. The naive shapes
/// are read as UTC, matching what lenient browser parsers historically did
/// with them; this path exists as a degraded fallback for malformed input,
/// not as a guaranteed-local parse.
fn parse_fallback(raw: &str) -> Result<DateTime<Local>, ParseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Local));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(Local.from_utc_datetime(&dt));
    }

    if let Some(midnight) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(Local.from_utc_datetime(&midnight));
    }

    Err(ParseError::Unrecognized(raw.to_string()))
}

/// Parse one numeric segment field, rejecting missing or non-numeric input.
fn num_field<T: std::str::FromStr>(raw: &str, field: Option<&str>) -> Result<T, ParseError> {
    field
        .ok_or_else(|| ParseError::InvalidCalendar(raw.to_string()))?
        .parse()
        .map_err(|_| ParseError::NonNumeric(raw.to_string()))
}
