#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Normalized point-of-interest types.
//!
//! A [`Place`] is produced from one loosely-shaped record of the upstream
//! nearby-places API. Only `name` and `category` are guaranteed; every other
//! field is best-effort.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A point of interest near the selected city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    /// Display name. Never empty.
    pub name: String,
    /// Category name (e.g. "Restaurant"). Never empty.
    pub category: String,
    /// Subcategory names, in source order.
    pub sub_categories: Vec<String>,
    /// Cuisine or attraction type names. `None` when the source had none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    /// Group names. `None` when the source had none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<String>>,
    /// Formatted street address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Distance from the city center, as sent by the upstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<Measure>,
    /// Average rating, as sent by the upstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Measure>,
    /// Ranking blurb (e.g. "#3 of 120 Restaurants in Austin").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranking: Option<String>,
    /// Price level, as sent by the upstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_level: Option<Measure>,
}

impl Place {
    /// Creates a place with only the required fields set.
    #[must_use]
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            sub_categories: Vec::new(),
            types: None,
            groups: None,
            address: None,
            distance: None,
            rating: None,
            ranking: None,
            price_level: None,
        }
    }

    /// Numeric distance, `NaN` when absent or not numeric.
    #[must_use]
    pub fn distance_value(&self) -> f64 {
        self.distance.as_ref().map_or(f64::NAN, Measure::to_number)
    }
}

/// A scalar the upstream sends either as a JSON number or as text.
///
/// The original representation is kept so it can be displayed verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measure {
    /// A JSON number.
    Number(serde_json::Number),
    /// A JSON string, e.g. `"0.42"` or `"$$ - $$$"`.
    Text(String),
}

impl Measure {
    /// Converts to a number the way a loosely-typed client would: numbers
    /// as-is, text trimmed and parsed as a decimal literal (empty text is
    /// `0`), anything unparseable is `NaN`.
    #[must_use]
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Number(n) => n.as_f64().unwrap_or(f64::NAN),
            Self::Text(s) => parse_numeric_text(s),
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Integral floats print without a fraction, like a JS number.
            Self::Number(n) => match n.as_f64() {
                Some(x) if n.is_f64() && x.fract() == 0.0 && x.abs() < 1e21 => write!(f, "{x}"),
                _ => write!(f, "{n}"),
            },
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Measure {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map_or_else(|| Self::Text(value.to_string()), Self::Number)
    }
}

impl From<&str> for Measure {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

fn parse_numeric_text(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }

    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    if unsigned == "Infinity" {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    // Rust's float parser also accepts "inf"/"nan" spellings; only plain
    // decimal literals are numbers here.
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return f64::NAN;
    }

    s.parse().unwrap_or(f64::NAN)
}
