#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the nearby places server.
//!
//! Form and query fields arrive as loose strings from the browser; the
//! helpers here turn them into typed values or `None`.

use serde::{Deserialize, Serialize};

/// Query parameters for the location autocomplete endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationSearchParams {
    /// Free-text `"city, state"` query.
    pub l: Option<String>,
}

/// Form body of the place search submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitForm {
    /// Display label of the chosen location (e.g. `"Austin, Texas"`).
    pub location: Option<String>,
    /// Id of the chosen city.
    pub id: Option<String>,
    /// Map zoom level used to size the search area.
    pub zoom: Option<String>,
    /// Optional address to mail the results to.
    pub email: Option<String>,
}

impl SubmitForm {
    /// The non-empty location label, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        non_empty(self.location.as_deref())
    }

    /// The city id parsed as an integer.
    #[must_use]
    pub fn city_id(&self) -> Option<i64> {
        non_empty(self.id.as_deref())?.parse().ok()
    }

    /// The zoom level parsed as an integer.
    #[must_use]
    pub fn zoom(&self) -> Option<u8> {
        non_empty(self.zoom.as_deref())?.parse().ok()
    }

    /// The non-empty e-mail address, if any.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        non_empty(self.email.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// Number of cities loaded in the index.
    pub city_count: usize,
}
