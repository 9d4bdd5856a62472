use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use url::Url;
use uuid::Uuid;

/// A domain rule violation.
///
/// The message names the offending field. Errors raised inside nested values are
/// prefixed with the containing field via [`ValidationError::within`], so the
/// top-level message carries the full path, e.g. `school period[1] name missing`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// `"<field> missing"`
    pub fn missing(field: &str) -> Self {
        Self::new(format!("{field} missing"))
    }

    /// `"<field> invalid"`
    pub fn invalid(field: &str) -> Self {
        Self::new(format!("{field} invalid"))
    }

    /// Prefix the message with the field that contains the failing value.
    pub fn within(self, container: impl fmt::Display) -> Self {
        Self::new(format!("{container} {}", self.message))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Payload validation: rules checked before a value is accepted for write.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Fails with `"<field> missing"` when `value` is empty or whitespace.
pub fn require(value: &str, field: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::missing(field));
    }
    Ok(())
}

/// Optional text may be absent, but when present it must not be blank.
pub fn require_if_present(value: Option<&str>, field: &str) -> Result<(), ValidationError> {
    match value {
        Some(v) if v.trim().is_empty() => Err(ValidationError::new(format!("{field} empty"))),
        _ => Ok(()),
    }
}

/// Present and parseable as a UUID.
pub fn require_uuid(value: &str, field: &str) -> Result<(), ValidationError> {
    require(value, field)?;
    Uuid::parse_str(value).map_err(|_| ValidationError::invalid(field))?;
    Ok(())
}

/// Absolute `http`/`https` URL with a non-empty host.
pub fn require_http_url(value: &str, field: &str) -> Result<(), ValidationError> {
    require(value, field)?;

    let parsed = Url::parse(value).map_err(|_| ValidationError::invalid(field))?;
    let host = parsed.host_str().unwrap_or_default();
    if !matches!(parsed.scheme(), "http" | "https") || host.is_empty() {
        return Err(ValidationError::invalid(field));
    }
    Ok(())
}

static MIME_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)[a-z]+/[a-z0-9][a-z0-9.+-]*$").expect("mime type pattern compiles")
});

/// MIME media type such as `image/png` or `text/plain; charset=utf-8`.
///
/// Only the part before `;` is checked: an alphabetic type, then a subtype
/// starting with a letter or digit followed by letters, digits, `-`, `+` or
/// `.`. Case is ignored.
pub fn require_mime_type(value: &str, field: &str) -> Result<(), ValidationError> {
    require(value, field)?;

    let base = value.split(';').next().unwrap_or_default().trim();
    if !MIME_TYPE.is_match(base) {
        return Err(ValidationError::invalid(field));
    }
    Ok(())
}

/// Parse one of a closed set of textual values.
///
/// Blank input reports `"<field> missing"`; anything outside `all` reports
/// `"<field> invalid = <value>"`.
pub fn parse_variant<T: Copy>(
    value: &str,
    field: &str,
    all: &[T],
    name: fn(&T) -> &'static str,
) -> Result<T, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::missing(field));
    }
    all.iter()
        .copied()
        .find(|v| name(v) == value)
        .ok_or_else(|| ValidationError::new(format!("{field} invalid = {value}")))
}
