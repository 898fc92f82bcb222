//! Public IP lookup used for the startup banner.

use serde::Deserialize;

use crate::ServerError;

/// Endpoint that echoes the caller's public address.
pub const CLIENT_INFO_URL: &str = "https://api.bigdatacloud.net/data/client-info";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClientInfo {
    ip_string: String,
}

/// Looks up the public IP address of this host.
///
/// # Errors
///
/// Returns [`ServerError`] if the request fails, the service answers with
/// anything but `200 OK` and a JSON body, or the body lacks `ipString`.
pub async fn fetch_public_ip(client: &reqwest::Client, url: &str) -> Result<String, ServerError> {
    let resp = client.get(url).send().await?;

    let status = resp.status();
    if status != reqwest::StatusCode::OK {
        return Err(ServerError::UnexpectedStatus {
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
        return Err(ServerError::UnexpectedContentType { content_type });
    }

    let text = resp.text().await?;
    let info: ClientInfo = serde_json::from_str(&text)?;
    Ok(info.ip_string)
}
