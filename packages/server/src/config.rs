//! Server configuration from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `BIND_ADDR` | `127.0.0.1` (`0.0.0.0` inside an Apify container) |
//! | `PORT` | `4321` |
//! | `APIFY_IS_AT_HOME` | unset; when set, `APIFY_CONTAINER_PORT` and `APIFY_CONTAINER_URL` take over port and public URL |
//! | `APIFY_TOKEN` | unset; e-mail delivery is disabled without it |
//! | `CITY_LIST_URL` | [`nearby_cities::remote::DEFAULT_CITY_LIST_URL`] |
//! | `PLACES_BASE_URL` | [`nearby_places::client::DEFAULT_BASE_URL`] |
//! | `MAIL_BASE_URL` | [`nearby_mailer::DEFAULT_BASE_URL`] |
//! | `INDEX_HTML` | `index.html` |
//! | `STYLES_DIR` | `styles` |

use std::path::PathBuf;

use crate::ServerError;

const DEFAULT_PORT: u16 = 4321;

/// Resolved server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind.
    pub bind_addr: String,
    /// Port to listen on.
    pub port: u16,
    /// Public URL the server is reachable at (for logging).
    pub public_url: String,
    /// Apify API token used for e-mail delivery.
    pub apify_token: Option<String>,
    /// Location of the city reference list.
    pub city_list_url: String,
    /// Nearby-places API host.
    pub places_base_url: String,
    /// Apify API host.
    pub mail_base_url: String,
    /// Page template with the results placeholder.
    pub index_html: PathBuf,
    /// Directory served under `/styles`.
    pub styles_dir: PathBuf,
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Config`] if a port variable is not a valid
    /// port number, or if `APIFY_IS_AT_HOME` is set without
    /// `APIFY_CONTAINER_PORT`.
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ServerError> {
        let at_home = lookup("APIFY_IS_AT_HOME").is_some();

        let (port, public_url, default_bind) = if at_home {
            let port = lookup("APIFY_CONTAINER_PORT").ok_or_else(|| ServerError::Config {
                message: "APIFY_IS_AT_HOME is set but APIFY_CONTAINER_PORT is not".to_string(),
            })?;
            let port = parse_port("APIFY_CONTAINER_PORT", &port)?;
            let url = lookup("APIFY_CONTAINER_URL")
                .unwrap_or_else(|| format!("http://localhost:{port}"));
            (port, url, "0.0.0.0")
        } else {
            let port = lookup("PORT")
                .map(|p| parse_port("PORT", &p))
                .transpose()?
                .unwrap_or(DEFAULT_PORT);
            (port, format!("http://localhost:{port}"), "127.0.0.1")
        };

        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| default_bind.to_string()),
            port,
            public_url,
            apify_token: lookup("APIFY_TOKEN").filter(|t| !t.is_empty()),
            city_list_url: lookup("CITY_LIST_URL").unwrap_or_else(|| {
                nearby_cities::remote::DEFAULT_CITY_LIST_URL.to_string()
            }),
            places_base_url: lookup("PLACES_BASE_URL")
                .unwrap_or_else(|| nearby_places::client::DEFAULT_BASE_URL.to_string()),
            mail_base_url: lookup("MAIL_BASE_URL")
                .unwrap_or_else(|| nearby_mailer::DEFAULT_BASE_URL.to_string()),
            index_html: lookup("INDEX_HTML").map_or_else(|| "index.html".into(), PathBuf::from),
            styles_dir: lookup("STYLES_DIR").map_or_else(|| "styles".into(), PathBuf::from),
        })
    }
}

fn parse_port(key: &str, value: &str) -> Result<u16, ServerError> {
    value.trim().parse().map_err(|_| ServerError::Config {
        message: format!("{key} is not a valid port: {value}"),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig, ServerError> {
        let vars: BTreeMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.bind_addr, "127.0.0.1");
        assert_eq!(cfg.port, 4321);
        assert_eq!(cfg.public_url, "http://localhost:4321");
        assert!(cfg.apify_token.is_none());
        assert_eq!(cfg.index_html, PathBuf::from("index.html"));
    }

    #[test]
    fn port_override() {
        let cfg = config(&[("PORT", "8080"), ("BIND_ADDR", "0.0.0.0")]).unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.bind_addr, "0.0.0.0");
    }

    #[test]
    fn apify_container_settings_take_over() {
        let cfg = config(&[
            ("APIFY_IS_AT_HOME", "1"),
            ("APIFY_CONTAINER_PORT", "4000"),
            ("APIFY_CONTAINER_URL", "https://abc.runs.apify.net"),
            ("PORT", "9999"),
            ("APIFY_TOKEN", "tok"),
        ])
        .unwrap();
        assert_eq!(cfg.port, 4000);
        assert_eq!(cfg.public_url, "https://abc.runs.apify.net");
        assert_eq!(cfg.bind_addr, "0.0.0.0");
        assert_eq!(cfg.apify_token.as_deref(), Some("tok"));
    }

    #[test]
    fn invalid_port_is_an_error() {
        assert!(matches!(
            config(&[("PORT", "http")]),
            Err(ServerError::Config { .. })
        ));
        assert!(matches!(
            config(&[("APIFY_IS_AT_HOME", "1")]),
            Err(ServerError::Config { .. })
        ));
    }

    #[test]
    fn empty_token_is_ignored() {
        assert!(config(&[("APIFY_TOKEN", "")]).unwrap().apify_token.is_none());
    }
}
