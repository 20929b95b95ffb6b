//! Secret-bearing values and the shared redaction placeholder

use std::fmt;

/// Written wherever a sensitive value has been removed, both by
/// `Sensitive`'s formatting and by the diff engine's redaction pass
pub const REDACTED: &str = "***REDACTED***";

/// A value that must never reach logs or error messages
///
/// Configuration snapshot contents live in one of these: they routinely hold
/// SMTP passwords, OAuth client secrets and tokens.
///
/// ```
/// use siteconf_core_types::{Sensitive, REDACTED};
///
/// let contents = Sensitive::new(r#"{"password": "hunter2"}"#);
/// assert_eq!(format!("{:?}", contents), REDACTED);
/// assert_eq!(contents.to_string(), REDACTED);
/// assert!(contents.expose().contains("hunter2"));
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Borrow the raw value; only the redaction pass should need this
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Sensitive<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}
