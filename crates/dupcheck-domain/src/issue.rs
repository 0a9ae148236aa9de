//! Issue key module - node identity in the detection graph

use std::borrow::Borrow;
use std::fmt;

/// Identifier of a tracked issue (e.g. `PROJ-1234`)
///
/// Keys are opaque and case-sensitive. They are compared byte-for-byte and
/// serve both as graph node identity and as map key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IssueKey(String);

impl IssueKey {
    /// Create a new issue key
    ///
    /// # Errors
    /// Returns error if the key is empty or only whitespace. Inner whitespace
    /// is allowed; callers trim before constructing.
    ///
    /// # Examples
    ///
    /// ```
    /// use dupcheck_domain::IssueKey;
    ///
    /// let key = IssueKey::new("PROJ-1234").unwrap();
    /// assert_eq!(key.as_str(), "PROJ-1234");
    /// assert!(IssueKey::new("").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, String> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err("Issue key cannot be empty".to_string());
        }

        Ok(Self(value))
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for IssueKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for IssueKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for IssueKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
