//! Search query normalization. Keep logic minimal and deterministic.

/// A non-empty, lower-cased substring needle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Normalize a raw query. Absent and empty queries both mean "no filter".
    ///
    /// Whitespace is kept as-is: `" "` is a real query that matches any text
    /// containing a space.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw {
            Some(s) if !s.is_empty() => Some(Self(s.to_lowercase())),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive substring containment.
    pub fn matches(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.0)
    }
}
