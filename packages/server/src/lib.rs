#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web front end for the nearby places service.
//!
//! Serves the search page, the `/locsearch` city autocomplete endpoint and
//! the form submission that looks up points of interest around the chosen
//! city. Results are rendered into the page or mailed to the user.

pub mod client_info;
pub mod config;
mod handlers;
pub mod render;

use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use nearby_cities::CityIndex;
use nearby_mailer::Mailer;
use nearby_places::client::NearbyClient;

use crate::config::ServerConfig;

/// Errors that abort server startup.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Invalid configuration.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the problem.
        message: String,
    },

    /// The city list could not be loaded.
    #[error("Failed to load city list: {0}")]
    Load(#[from] nearby_cities::LoadError),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error (template read, socket bind).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An upstream returned something other than `200 OK`.
    #[error("Unexpected response code: {status}")]
    UnexpectedStatus {
        /// HTTP status code received.
        status: u16,
    },

    /// An upstream did not return JSON.
    #[error("Unexpected content type: {content_type}")]
    UnexpectedContentType {
        /// The `Content-Type` header value received.
        content_type: String,
    },
}

/// Shared application state.
pub struct AppState {
    /// Sorted city reference list. Read-only after startup.
    pub cities: CityIndex,
    /// Nearby-places API client.
    pub places: NearbyClient,
    /// Outbound mail client.
    pub mailer: Mailer,
    /// Page template containing [`render::RESULTS_PLACEHOLDER`].
    pub template: String,
}

/// Registers the application routes.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index))
        .route("/", web::post().to(handlers::submit))
        .route("/locsearch", web::get().to(handlers::location_search))
        .route("/api/health", web::get().to(handlers::health));
}

/// Starts the server.
///
/// Looks up the public IP, downloads and indexes the city list, reads the
/// page template and then serves requests until shutdown. This is a regular
/// async function; the caller provides the runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns [`ServerError`] if any startup step fails or the HTTP server
/// cannot bind.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let client = reqwest::Client::new();

    let ip = client_info::fetch_public_ip(&client, client_info::CLIENT_INFO_URL).await?;
    let cities = nearby_cities::remote::fetch_city_list(&client, &config.city_list_url).await?;

    log::info!("Reading page template {}", config.index_html.display());
    let template = std::fs::read_to_string(&config.index_html)?;

    let mailer = Mailer::new(
        client.clone(),
        config.mail_base_url.clone(),
        config.apify_token.clone(),
    );
    if !mailer.is_configured() {
        log::warn!("APIFY_TOKEN not set; e-mail delivery is disabled");
    }

    let state = web::Data::new(AppState {
        cities,
        places: NearbyClient::new(client, config.places_base_url.clone()),
        mailer,
        template,
    });

    let styles_dir = config.styles_dir.clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(routes)
            .service(Files::new("/styles", styles_dir.clone()))
    })
    .bind((config.bind_addr.as_str(), config.port))?;

    log::info!("Server started");
    log::info!("Server ip: {ip}");
    log::info!("URL: {}", config.public_url);
    log::info!("port: {}", config.port);

    server.run().await?;
    Ok(())
}
