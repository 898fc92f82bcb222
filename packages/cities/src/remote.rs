//! Downloads the city reference list over HTTPS.

use crate::{CityIndex, LoadError};

/// Public JSON document holding the US city list.
pub const DEFAULT_CITY_LIST_URL: &str = "https://api.npoint.io/e53b0fd5a237603e0f09";

/// Fetches the city list from `url` and builds a [`CityIndex`] from it.
///
/// # Errors
///
/// Returns [`LoadError`] if the request fails, the server answers with
/// anything but `200 OK` or a non-JSON content type, or the body is not a
/// non-empty array of city records.
pub async fn fetch_city_list(client: &reqwest::Client, url: &str) -> Result<CityIndex, LoadError> {
    log::info!("Downloading city list from {url}");

    let resp = client.get(url).send().await?;

    let status = resp.status();
    if status != reqwest::StatusCode::OK {
        return Err(LoadError::UnexpectedStatus {
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
        return Err(LoadError::UnexpectedContentType { content_type });
    }

    let text = resp.text().await?;
    let body: serde_json::Value = serde_json::from_str(&text)?;
    let index = CityIndex::load(&body)?;

    log::info!("City list loaded: {} cities", index.len());

    Ok(index)
}
