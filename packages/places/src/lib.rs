#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Nearby points of interest.
//!
//! Fetches the upstream map POI payload for a coordinate ([`client`]),
//! converts its loosely-typed records into [`Place`] values ([`normalize`])
//! and orders them by distance ([`rank`]).
//!
//! Individual malformed records are dropped silently; only a payload that is
//! unusable as a whole surfaces as [`PlacesError::MalformedResponse`].

pub mod client;
pub mod normalize;
pub mod rank;
mod sort;

pub use nearby_places_models::{Measure, Place};

/// Errors from fetching or normalizing nearby places.
#[derive(Debug, thiserror::Error)]
pub enum PlacesError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The body is not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The upstream returned something other than `200 OK`.
    #[error("Unexpected response code: {status}")]
    UnexpectedStatus {
        /// HTTP status code received.
        status: u16,
    },

    /// The upstream did not return JSON.
    #[error("Unexpected content type: {content_type}")]
    UnexpectedContentType {
        /// The `Content-Type` header value received.
        content_type: String,
    },

    /// The top-level payload has the wrong shape.
    #[error("Malformed response: {message}")]
    MalformedResponse {
        /// Description of what was wrong.
        message: String,
    },
}
