#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! City reference record types.
//!
//! A [`City`] is one entry of the static US city/state list that backs the
//! location autocomplete. The wire shape (`id`, `city`, `state_name`, `lat`,
//! `lng`) is shared by the upstream city list and the `/locsearch` endpoint,
//! so the same type is used for both.

use serde::{Deserialize, Serialize};

/// A named US city/state pair with coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    /// Unique, stable identifier.
    pub id: i64,
    /// City name as it appears in the source list (e.g. "Austin").
    pub city: String,
    /// Full state name (e.g. "Texas").
    pub state_name: String,
    /// Latitude (WGS84).
    pub lat: f64,
    /// Longitude (WGS84).
    pub lng: f64,
}

impl City {
    /// Returns a `"City, State"` display label.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}, {}", self.city, self.state_name)
    }
}
