//! Locale-style string collation.
//!
//! Approximates root-locale collation with a fixed sequence of comparison
//! levels:
//!
//! 1. **Primary** — transliterated, lowercased text (`"Zürich"` ≈ `"zurich"`).
//! 2. **Secondary** — lowercased text with accents kept.
//! 3. **Tertiary** — letter case, lowercase before uppercase.
//! 4. **Identical** — raw code-point order.
//!
//! The last level makes the ordering total: two keys only compare equal when
//! the source strings are identical.

use std::cmp::Ordering;

/// Precomputed sort key for one string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    primary: String,
    secondary: String,
    tertiary: Vec<u8>,
    identical: String,
}

impl CollationKey {
    /// Builds the collation key for `s`.
    #[must_use]
    pub fn new(s: &str) -> Self {
        Self {
            primary: deunicode::deunicode(s).to_lowercase(),
            secondary: s.to_lowercase(),
            tertiary: s.chars().map(|c| u8::from(c.is_uppercase())).collect(),
            identical: s.to_owned(),
        }
    }
}

/// Compares two strings in collation order.
#[must_use]
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    CollationKey::new(a).cmp(&CollationKey::new(b))
}
