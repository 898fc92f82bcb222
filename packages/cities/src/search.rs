//! Autocomplete query parsing and matching.
//!
//! A query like `"new york, ny"` is split into a city token and a state
//! token. A city token alone is a prefix match on the city name; with a
//! state token the city name must match exactly and the state name is
//! prefix-matched. A bare `", tex"` matches on state alone.

use nearby_cities_models::City;

/// Lowercased, trimmed tokens of an autocomplete query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// City token (may be empty).
    pub city: String,
    /// State token (may be empty).
    pub state: String,
}

impl SearchQuery {
    /// Parses raw free text.
    ///
    /// Only the first two comma-separated pieces are considered; anything
    /// after a second comma is ignored.
    #[must_use]
    pub fn parse(l: &str) -> Self {
        let mut parts = l.split(',').take(2).map(|p| p.trim().to_lowercase());
        Self {
            city: parts.next().unwrap_or_default(),
            state: parts.next().unwrap_or_default(),
        }
    }

    /// Whether both tokens are empty. Such a query matches nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.city.is_empty() && self.state.is_empty()
    }

    /// Tests whether `city` satisfies this query (case-insensitive).
    #[must_use]
    pub fn matches(&self, city: &City) -> bool {
        match (self.city.is_empty(), self.state.is_empty()) {
            (false, false) => {
                city.city.to_lowercase() == self.city
                    && city.state_name.to_lowercase().starts_with(&self.state)
            }
            (false, true) => city.city.to_lowercase().starts_with(&self.city),
            (true, false) => city.state_name.to_lowercase().starts_with(&self.state),
            (true, true) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city(id: i64, name: &str, state: &str) -> City {
        City {
            id,
            city: name.to_string(),
            state_name: state.to_string(),
            lat: 0.0,
            lng: 0.0,
        }
    }

    fn cities() -> Vec<City> {
        vec![
            city(1, "New Haven", "Connecticut"),
            city(2, "New York", "New York"),
            city(3, "New York", "Nyland"),
            city(4, "Newark", "New Jersey"),
            city(5, "York", "Pennsylvania"),
        ]
    }

    fn matching(l: &str) -> Vec<i64> {
        let query = SearchQuery::parse(l);
        cities()
            .iter()
            .filter(|c| query.matches(c))
            .map(|c| c.id)
            .collect()
    }

    #[test]
    fn parses_city_and_state_tokens() {
        let query = SearchQuery::parse("  New York ,  NY ");
        assert_eq!(query.city, "new york");
        assert_eq!(query.state, "ny");
    }

    #[test]
    fn ignores_text_after_second_comma() {
        let query = SearchQuery::parse("Austin, Texas, USA");
        assert_eq!(query.city, "austin");
        assert_eq!(query.state, "texas");
    }

    #[test]
    fn city_and_state_requires_exact_city_and_state_prefix() {
        assert_eq!(matching("new york, ny"), vec![3]);
        assert_eq!(matching("NEW YORK, new"), vec![2]);
        assert!(matching("new, new").is_empty());
    }

    #[test]
    fn city_only_is_prefix_match() {
        assert_eq!(matching("new"), vec![1, 2, 3, 4]);
        assert_eq!(matching("york"), vec![5]);
    }

    #[test]
    fn trailing_comma_behaves_like_city_only() {
        assert_eq!(matching("new,"), vec![1, 2, 3, 4]);
    }

    #[test]
    fn state_only_is_prefix_match_on_state() {
        assert_eq!(matching(", new"), vec![2, 4]);
        assert_eq!(matching(" , penn"), vec![5]);
    }

    #[test]
    fn empty_query_matches_nothing() {
        assert!(SearchQuery::parse("").is_empty());
        assert!(matching("").is_empty());
        assert!(matching(" ,  ").is_empty());
    }
}
