//! HTML rendering for the results page.

use std::fmt::Write as _;

use nearby_places::Place;

/// Marker in the page template replaced by the results fragment.
pub const RESULTS_PLACEHOLDER: &str = "<!-- prevResuts -->";

/// Inserts `fragment` into the page template.
#[must_use]
pub fn render_page(template: &str, fragment: &str) -> String {
    template.replacen(RESULTS_PLACEHOLDER, fragment, 1)
}

/// Fragment shown when the search produced no places.
pub const NO_RESULTS: &str = "<p>No results found</p>";

/// Renders the ranked places as an HTML table.
#[must_use]
pub fn render_table(places: &[Place]) -> String {
    let mut tbl = String::from(
        "<table><caption><h2>Nearby places</h2></caption>\
         <tr><th>Place</th><th>Category</th><th>Address</th><th>Distance</th><th>Rating</th></tr>",
    );

    for p in places {
        let distance = p.distance.as_ref().map(ToString::to_string).unwrap_or_default();
        let rating = p.rating.as_ref().map(ToString::to_string).unwrap_or_default();
        let _ = write!(
            tbl,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&p.name),
            escape_html(&p.category),
            escape_html(p.address.as_deref().unwrap_or_default()),
            escape_html(&distance),
            escape_html(&rating),
        );
    }

    tbl.push_str("</table>");
    tbl
}

/// Confirmation shown after the results were mailed.
#[must_use]
pub fn render_mail_sent(email: &str) -> String {
    format!("<p>Results will be sent to {}</p>", escape_html(email))
}

/// Message shown when mailing the results failed.
#[must_use]
pub fn render_mail_failed(reason: &str) -> String {
    format!("<p>Sending e-mail failed: {}</p>", escape_html(reason))
}

/// Escapes text for use in HTML element content and attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
