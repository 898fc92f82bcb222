#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Nearby places server binary.

use nearby_server::config::ServerConfig;

#[actix_web::main]
async fn main() -> std::process::ExitCode {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let result = match ServerConfig::from_env() {
        Ok(config) => nearby_server::run_server(config).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        log::error!("Server failed: {e}");
        return std::process::ExitCode::FAILURE;
    }

    std::process::ExitCode::SUCCESS
}
