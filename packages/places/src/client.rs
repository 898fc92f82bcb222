//! HTTP client for the upstream map POI endpoint.

use crate::normalize::normalize_payload;
use crate::rank::rank;
use crate::{Place, PlacesError};

/// Default upstream host.
pub const DEFAULT_BASE_URL: &str = "https://www.flipkey.com";

/// Maximum number of records requested per category.
pub const LIMIT: u32 = 25;

/// Client for the nearby-places endpoint.
#[derive(Debug, Clone)]
pub struct NearbyClient {
    client: reqwest::Client,
    base_url: String,
}

impl NearbyClient {
    /// Creates a client against `base_url` (no trailing slash).
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Builds the request URL for a coordinate and zoom level.
    #[must_use]
    pub fn url(&self, lat: f64, lng: f64, zoom: u8) -> String {
        format!(
            "{}/content/map_poi?lat={lat}&lng={lng}&zoom={zoom}&restaurants=true&attractions=true&limit={LIMIT}",
            self.base_url
        )
    }

    /// Fetches restaurants and attractions around `(lat, lng)`, normalized
    /// and ranked by distance.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError`] if the request fails, the server answers with
    /// anything but `200 OK` or a non-JSON content type, or the payload is
    /// malformed at the top level.
    pub async fn fetch(&self, lat: f64, lng: f64, zoom: u8) -> Result<Vec<Place>, PlacesError> {
        let url = self.url(lat, lng, zoom);
        log::debug!("Fetching nearby places: {url}");

        let resp = self.client.get(&url).send().await?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            return Err(PlacesError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.contains("application/json") {
            return Err(PlacesError::UnexpectedContentType { content_type });
        }

        let text = resp.text().await?;
        let body: serde_json::Value = serde_json::from_str(&text)?;

        let places = rank(normalize_payload(&body)?);
        log::info!("Found {} nearby places for {lat},{lng}", places.len());

        Ok(places)
    }
}
