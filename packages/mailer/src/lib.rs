#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Outbound e-mail delivery.
//!
//! Mail is sent by starting a run of the Apify `send-mail` actor, which
//! accepts a JSON body of `{to, subject, html}`. A successful start is
//! answered with `201 Created`.

use serde::Serialize;

/// Default Apify API host.
pub const DEFAULT_BASE_URL: &str = "https://api.apify.com";

/// Errors from sending mail.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No API token is configured.
    #[error("APIFY_TOKEN is not set")]
    MissingToken,

    /// The actor run was not created.
    #[error("Unexpected response code: {status}")]
    UnexpectedStatus {
        /// HTTP status code received.
        status: u16,
    },

    /// The API did not answer with JSON.
    #[error("Unexpected content type: {content_type}")]
    UnexpectedContentType {
        /// The `Content-Type` header value received.
        content_type: String,
    },
}

#[derive(Debug, Serialize)]
struct SendMailInput<'a> {
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// Client for the send-mail actor.
#[derive(Debug, Clone)]
pub struct Mailer {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl Mailer {
    /// Creates a mailer. Sending fails with [`MailError::MissingToken`] when
    /// `token` is `None`.
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            token,
        }
    }

    /// Whether an API token is configured.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.token.is_some()
    }

    fn runs_url(&self, token: &str) -> String {
        format!(
            "{}/v2/acts/apify~send-mail/runs?token={token}",
            self.base_url
        )
    }

    /// Sends an HTML message to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`MailError`] if no token is configured, the request fails, or
    /// the API answers with anything but `201 Created` and a JSON body.
    pub async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), MailError> {
        let token = self.token.as_deref().ok_or(MailError::MissingToken)?;

        let resp = self
            .client
            .post(self.runs_url(token))
            .json(&SendMailInput { to, subject, html })
            .send()
            .await?;

        let status = resp.status();
        if status != reqwest::StatusCode::CREATED {
            return Err(MailError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if !content_type.contains("application/json") {
            return Err(MailError::UnexpectedContentType {
                content_type: content_type.to_string(),
            });
        }

        log::info!("e-mail sent");
        Ok(())
    }
}
