//! HTTP handler functions for the nearby places server.

use actix_web::http::header::{self, ContentType};
use actix_web::{HttpRequest, HttpResponse, web};
use nearby_places::Place;
use nearby_server_models::{ApiHealth, LocationSearchParams, SubmitForm};

use crate::{AppState, render};

/// `GET /`
///
/// Serves the search page with an empty results area.
pub async fn index(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    {
        let info = req.connection_info();
        log::info!("Request arrived");
        log::info!(
            "Client ip: {}",
            info.realip_remote_addr().unwrap_or("unknown")
        );
    }
    log::info!(
        "Client user-agent: {}",
        req.headers()
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    );

    html(render::render_page(&state.template, ""))
}

/// `GET /locsearch?l=`
///
/// Returns the cities matching the autocomplete query as a JSON array, in
/// index order.
pub async fn location_search(
    state: web::Data<AppState>,
    params: web::Query<LocationSearchParams>,
) -> HttpResponse {
    let matches = params
        .l
        .as_deref()
        .map(|l| state.cities.search(l))
        .unwrap_or_default();

    log::debug!("locsearch {:?}: {} matches", params.l, matches.len());

    HttpResponse::Ok().json(matches)
}

/// `POST /`
///
/// Looks up places around the submitted city and renders them into the
/// page, or mails them when an e-mail address was given.
pub async fn submit(state: web::Data<AppState>, form: web::Form<SubmitForm>) -> HttpResponse {
    log::debug!("Form submitted: {form:?}");

    let Some(location) = form.location() else {
        return bad_request();
    };
    let Some(city) = form.city_id().and_then(|id| state.cities.find_by_id(id)) else {
        return bad_request();
    };
    let Some(zoom) = form.zoom() else {
        return bad_request();
    };

    log::info!(
        "Searching near {} (lat: {}, lng: {}, zoom: {zoom})",
        city.label(),
        city.lat,
        city.lng
    );

    match state.places.fetch(city.lat, city.lng, zoom).await {
        Ok(places) => {
            let fragment = results_fragment(&state, location, &places, form.email()).await;
            html(render::render_page(&state.template, &fragment))
        }
        Err(e) => {
            log::error!("Failed to fetch nearby places: {e}");
            internal_error()
        }
    }
}

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        city_count: state.cities.len(),
    })
}

async fn results_fragment(
    state: &AppState,
    location: &str,
    places: &[Place],
    email: Option<&str>,
) -> String {
    if places.is_empty() {
        return render::NO_RESULTS.to_string();
    }

    let table = render::render_table(places);
    let Some(email) = email else {
        return table;
    };

    let subject = format!("Your requested nearby places for {location}");
    match state.mailer.send(email, &subject, &table).await {
        Ok(()) => render::render_mail_sent(email),
        Err(e) => {
            log::error!("Failed to send results to {email}: {e}");
            render::render_mail_failed(&e.to_string())
        }
    }
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

fn bad_request() -> HttpResponse {
    HttpResponse::BadRequest()
        .content_type(ContentType::plaintext())
        .body("Bad Request")
}

fn internal_error() -> HttpResponse {
    HttpResponse::InternalServerError()
        .content_type(ContentType::plaintext())
        .body("Internal Server Error")
}
