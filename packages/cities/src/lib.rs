#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Sorted US city index and autocomplete matching.
//!
//! The full city list is loaded once at startup into a [`CityIndex`], sorted
//! by city name and then state name using [`collation`] order, and is never
//! mutated afterwards. Autocomplete queries ([`search::SearchQuery`]) filter
//! the index while preserving that canonical order.

pub mod collation;
pub mod remote;
pub mod search;

use std::collections::BTreeSet;

use nearby_cities_models::City;
use serde::Deserialize as _;

use crate::collation::CollationKey;
use crate::search::SearchQuery;

/// Errors that can occur while loading the city reference list.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The body could not be parsed as JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The upstream returned something other than `200 OK`.
    #[error("Unexpected response code: {status}")]
    UnexpectedStatus {
        /// HTTP status code received.
        status: u16,
    },

    /// The upstream did not return JSON.
    #[error("Unexpected content type: {content_type}")]
    UnexpectedContentType {
        /// The `Content-Type` header value received.
        content_type: String,
    },

    /// The payload is not a JSON array.
    #[error("Unexpected content: downloaded JSON is not an array")]
    NotAnArray,

    /// The payload is an empty array.
    #[error("Unexpected content: downloaded array is empty")]
    Empty,

    /// An element of the array is not a valid city record.
    #[error("Invalid city record at index {index}: {source}")]
    InvalidRecord {
        /// Position of the offending element.
        index: usize,
        /// Underlying deserialization error.
        source: serde_json::Error,
    },

    /// Two records share the same id.
    #[error("Duplicate city id: {id}")]
    DuplicateId {
        /// The repeated id.
        id: i64,
    },
}

/// Immutable, canonically ordered list of cities.
///
/// Construct once with [`CityIndex::load`] (or [`CityIndex::from_cities`])
/// and share by reference; all query methods take `&self`.
#[derive(Debug, Clone)]
pub struct CityIndex {
    cities: Vec<City>,
}

impl CityIndex {
    /// Builds the index from the raw JSON city list.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NotAnArray`] or [`LoadError::Empty`] if `raw` is
    /// not a non-empty array, [`LoadError::InvalidRecord`] if an element is
    /// not a city record, and [`LoadError::DuplicateId`] if ids repeat.
    pub fn load(raw: &serde_json::Value) -> Result<Self, LoadError> {
        let items = raw.as_array().ok_or(LoadError::NotAnArray)?;
        if items.is_empty() {
            return Err(LoadError::Empty);
        }

        let cities = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                City::deserialize(item)
                    .map_err(|source| LoadError::InvalidRecord { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_cities(cities)
    }

    /// Builds the index from already-parsed cities.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Empty`] if `cities` is empty and
    /// [`LoadError::DuplicateId`] if ids repeat.
    pub fn from_cities(mut cities: Vec<City>) -> Result<Self, LoadError> {
        if cities.is_empty() {
            return Err(LoadError::Empty);
        }

        let mut seen = BTreeSet::new();
        for city in &cities {
            if !seen.insert(city.id) {
                return Err(LoadError::DuplicateId { id: city.id });
            }
        }

        // Exactly equal city names fall through to the state name; any other
        // pair is decided by the city key alone since keys of distinct
        // strings never compare equal.
        cities.sort_by_cached_key(|c| {
            (
                CollationKey::new(&c.city),
                CollationKey::new(&c.state_name),
            )
        });

        log::debug!("Loaded {} cities into index", cities.len());

        Ok(Self { cities })
    }

    /// Number of cities in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Whether the index holds no cities. Always `false` for a loaded index.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// All cities in canonical order.
    #[must_use]
    pub fn as_slice(&self) -> &[City] {
        &self.cities
    }

    /// Looks up a city by its id.
    #[must_use]
    pub fn find_by_id(&self, id: i64) -> Option<&City> {
        self.cities.iter().find(|c| c.id == id)
    }

    /// Returns the cities matching the free-text autocomplete query `l`,
    /// in canonical order.
    #[must_use]
    pub fn search(&self, l: &str) -> Vec<&City> {
        let query = SearchQuery::parse(l);
        if query.is_empty() {
            return Vec::new();
        }
        self.cities.iter().filter(|c| query.matches(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_cities() -> serde_json::Value {
        serde_json::json!([
            {"id": 1, "city": "Austin", "state_name": "Texas", "lat": 30.3, "lng": -97.7},
            {"id": 2, "city": "austin", "state_name": "Arkansas", "lat": 34.9, "lng": -91.9},
            {"id": 3, "city": "Boston", "state_name": "Massachusetts", "lat": 42.3, "lng": -71.1}
        ])
    }

    fn ids(cities: &[City]) -> Vec<i64> {
        cities.iter().map(|c| c.id).collect()
    }

    #[test]
    fn sorts_case_variants_together_before_later_names() {
        let index = CityIndex::load(&raw_cities()).unwrap();
        assert_eq!(ids(index.as_slice()), vec![2, 1, 3]);
    }

    #[test]
    fn equal_city_names_are_ordered_by_state() {
        let raw = serde_json::json!([
            {"id": 10, "city": "Springfield", "state_name": "Missouri", "lat": 37.2, "lng": -93.3},
            {"id": 11, "city": "Springfield", "state_name": "Illinois", "lat": 39.8, "lng": -89.6},
            {"id": 12, "city": "Springfield", "state_name": "Massachusetts", "lat": 42.1, "lng": -72.5}
        ]);
        let index = CityIndex::load(&raw).unwrap();
        assert_eq!(ids(index.as_slice()), vec![11, 12, 10]);
    }

    #[test]
    fn load_is_deterministic() {
        let a = CityIndex::load(&raw_cities()).unwrap();
        let b = CityIndex::load(&raw_cities()).unwrap();
        assert_eq!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn output_is_ordered_by_city_then_state() {
        let index = CityIndex::load(&raw_cities()).unwrap();
        for pair in index.as_slice().windows(2) {
            let by_city = collation::locale_cmp(&pair[0].city, &pair[1].city);
            assert!(
                by_city.is_lt()
                    || (pair[0].city == pair[1].city
                        && collation::locale_cmp(&pair[0].state_name, &pair[1].state_name)
                            .is_le()),
                "{pair:?} out of order"
            );
        }
    }

    #[test]
    fn rejects_non_array_payload() {
        let err = CityIndex::load(&serde_json::json!({"cities": []})).unwrap_err();
        assert!(matches!(err, LoadError::NotAnArray));
    }

    #[test]
    fn rejects_empty_array() {
        let err = CityIndex::load(&serde_json::json!([])).unwrap_err();
        assert!(matches!(err, LoadError::Empty));
    }

    #[test]
    fn rejects_malformed_record() {
        let raw = serde_json::json!([
            {"id": 1, "city": "Austin", "state_name": "Texas", "lat": 30.3, "lng": -97.7},
            {"id": 2, "city": "Nowhere"}
        ]);
        let err = CityIndex::load(&raw).unwrap_err();
        assert!(matches!(err, LoadError::InvalidRecord { index: 1, .. }));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let raw = serde_json::json!([
            {"id": 5, "city": "Austin", "state_name": "Texas", "lat": 30.3, "lng": -97.7},
            {"id": 5, "city": "Boston", "state_name": "Massachusetts", "lat": 42.3, "lng": -71.1}
        ]);
        let err = CityIndex::load(&raw).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateId { id: 5 }));
    }

    #[test]
    fn finds_city_by_id() {
        let index = CityIndex::load(&raw_cities()).unwrap();
        assert_eq!(index.find_by_id(3).map(|c| c.city.as_str()), Some("Boston"));
        assert!(index.find_by_id(99).is_none());
    }

    #[test]
    fn search_preserves_canonical_order() {
        let index = CityIndex::load(&raw_cities()).unwrap();
        let hits: Vec<i64> = index.search("aus").iter().map(|c| c.id).collect();
        assert_eq!(hits, vec![2, 1]);
    }

    #[test]
    fn search_with_state_requires_exact_city() {
        let index = CityIndex::load(&raw_cities()).unwrap();
        let hits: Vec<i64> = index.search("Austin, tex").iter().map(|c| c.id).collect();
        assert_eq!(hits, vec![1]);
        assert!(index.search("Aus, tex").is_empty());
    }

    #[test]
    fn empty_search_returns_nothing() {
        let index = CityIndex::load(&raw_cities()).unwrap();
        assert!(index.search("").is_empty());
        assert!(index.search("   ").is_empty());
        assert!(index.search(" , ").is_empty());
    }
}
