//! Converts raw upstream POI records into [`Place`] values.
//!
//! The upstream payload is an object whose array-valued fields (e.g.
//! `restaurants`, `attractions`) hold records of an ad-hoc shape. Every field
//! is read through an explicit presence check. A field counts as present only
//! when its value is "truthy": `null`, `false`, `0`, `NaN` and `""` are all
//! treated as missing, so a `distance` of `0` is dropped like an absent one.

use nearby_places_models::{Measure, Place};
use serde_json::Value;

use crate::PlacesError;

/// Normalizes every record of every array-valued field of `payload`.
///
/// A top-level array is walked the same way: each of its elements that is
/// itself an array is a list of records, anything else is ignored. Records
/// without a name or a resolvable category name are skipped.
///
/// # Errors
///
/// Returns [`PlacesError::MalformedResponse`] if `payload` is neither a JSON
/// object nor an array.
pub fn normalize_payload(payload: &Value) -> Result<Vec<Place>, PlacesError> {
    let sources: Box<dyn Iterator<Item = &Value> + '_> = match payload {
        Value::Object(map) => Box::new(map.values()),
        Value::Array(items) => Box::new(items.iter()),
        other => {
            return Err(PlacesError::MalformedResponse {
                message: format!("expected a JSON object or array, got {}", type_name(other)),
            });
        }
    };

    let mut places = Vec::new();
    let mut dropped = 0_usize;

    for records in sources.filter_map(Value::as_array) {
        for record in records {
            if let Some(place) = normalize_place(record) {
                places.push(place);
            } else {
                dropped += 1;
            }
        }
    }

    log::debug!(
        "Normalized {} places ({dropped} records dropped)",
        places.len()
    );

    Ok(places)
}

/// Normalizes a single raw record.
///
/// Returns `None` when the record lacks a non-empty `name` or a non-empty
/// `category.name`.
#[must_use]
pub fn normalize_place(record: &Value) -> Option<Place> {
    let name = present(record, "name").and_then(Value::as_str)?;
    let category = present(record, "category")
        .and_then(|c| present(c, "name"))
        .and_then(Value::as_str)?;

    let mut place = Place::new(name, category);

    if let Some(subcategories) = record.get("subcategory").and_then(Value::as_array) {
        place.sub_categories = names(subcategories);
    }

    let types = record
        .get("cuisine")
        .and_then(Value::as_array)
        .or_else(|| record.get("attraction_types").and_then(Value::as_array));
    place.types = types.filter(|t| !t.is_empty()).map(|t| names(t));

    place.groups = record
        .get("groups")
        .and_then(Value::as_array)
        .filter(|g| !g.is_empty())
        .map(|g| names(g));

    place.address = present(record, "address_obj")
        .and_then(|a| present(a, "address_string"))
        .and_then(Value::as_str)
        .map(str::to_string);

    place.distance = measure(record, "distance");
    place.rating = measure(record, "rating");

    place.ranking = present(record, "ranking_data")
        .and_then(|r| present(r, "ranking_string"))
        .and_then(Value::as_str)
        .map(str::to_string);

    place.price_level = measure(record, "price_level");

    Some(place)
}

/// Loose truthiness of a JSON value.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Returns `value[key]` if `value` is an object and the field is truthy.
fn present<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| truthy(v))
}

/// Collects the truthy string `name` of each element, skipping the rest.
fn names(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| present(item, "name").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}

fn measure(record: &Value, key: &str) -> Option<Measure> {
    match present(record, key)? {
        Value::Number(n) => Some(Measure::Number(n.clone())),
        Value::String(s) => Some(Measure::Text(s.clone())),
        other => {
            log::debug!("Ignoring non-scalar {key}: {other}");
            None
        }
    }
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_record_gets_empty_sub_categories() {
        let payload = json!({
            "restaurants": [{"name": "Joe's", "category": {"name": "Diner"}}]
        });
        let places = normalize_payload(&payload).unwrap();

        assert_eq!(places.len(), 1);
        assert_eq!(places[0].name, "Joe's");
        assert_eq!(places[0].category, "Diner");
        assert!(places[0].sub_categories.is_empty());
        assert!(places[0].types.is_none());
        assert!(places[0].groups.is_none());
        assert!(places[0].distance.is_none());
    }

    #[test]
    fn drops_records_without_name_or_category() {
        let payload = json!({
            "restaurants": [
                {"category": {"name": "Diner"}},
                {"name": "", "category": {"name": "Diner"}},
                {"name": "No Category"},
                {"name": "Nameless Category", "category": {}},
                {"name": "Blank Category", "category": {"name": ""}},
                {"name": "Kept", "category": {"name": "Cafe"}}
            ]
        });
        let places = normalize_payload(&payload).unwrap();

        assert_eq!(places.len(), 1);
        assert_eq!(places[0].name, "Kept");
    }

    #[test]
    fn drops_non_object_records() {
        let payload = json!({"attractions": [null, 3, "text", [1, 2]]});
        assert!(normalize_payload(&payload).unwrap().is_empty());
    }

    #[test]
    fn cuisine_becomes_types() {
        let record = json!({
            "name": "Luigi's",
            "category": {"name": "Restaurant"},
            "cuisine": [{"name": "Italian"}]
        });
        let place = normalize_place(&record).unwrap();
        assert_eq!(place.types, Some(vec!["Italian".to_string()]));
    }

    #[test]
    fn cuisine_takes_precedence_over_attraction_types() {
        let record = json!({
            "name": "Museum Cafe",
            "category": {"name": "Restaurant"},
            "cuisine": [{"name": "Cafe"}],
            "attraction_types": [{"name": "Museums"}]
        });
        let place = normalize_place(&record).unwrap();
        assert_eq!(place.types, Some(vec!["Cafe".to_string()]));
    }

    #[test]
    fn attraction_types_used_when_cuisine_missing() {
        let record = json!({
            "name": "Zilker Park",
            "category": {"name": "Attraction"},
            "cuisine": "none",
            "attraction_types": [{"name": "Parks"}, {"id": 4}, {"name": "Nature"}]
        });
        let place = normalize_place(&record).unwrap();
        assert_eq!(
            place.types,
            Some(vec!["Parks".to_string(), "Nature".to_string()])
        );
    }

    #[test]
    fn empty_cuisine_omits_types() {
        let record = json!({
            "name": "Diner",
            "category": {"name": "Restaurant"},
            "cuisine": []
        });
        assert!(normalize_place(&record).unwrap().types.is_none());
    }

    #[test]
    fn non_empty_source_without_names_keeps_empty_types() {
        let record = json!({
            "name": "Diner",
            "category": {"name": "Restaurant"},
            "cuisine": [{"id": 1}]
        });
        assert_eq!(normalize_place(&record).unwrap().types, Some(Vec::new()));
    }

    #[test]
    fn sub_categories_skip_unnamed_entries() {
        let record = json!({
            "name": "Franklin Barbecue",
            "category": {"name": "Restaurant"},
            "subcategory": [{"name": "BBQ"}, {"key": "x"}, null, {"name": "Lunch"}]
        });
        let place = normalize_place(&record).unwrap();
        assert_eq!(place.sub_categories, vec!["BBQ", "Lunch"]);
    }

    #[test]
    fn groups_only_attached_when_non_empty() {
        let with_groups = json!({
            "name": "Capitol",
            "category": {"name": "Attraction"},
            "groups": [{"name": "Landmarks"}]
        });
        let empty_groups = json!({
            "name": "Capitol",
            "category": {"name": "Attraction"},
            "groups": []
        });
        assert_eq!(
            normalize_place(&with_groups).unwrap().groups,
            Some(vec!["Landmarks".to_string()])
        );
        assert!(normalize_place(&empty_groups).unwrap().groups.is_none());
    }

    #[test]
    fn copies_optional_fields() {
        let record = json!({
            "name": "Joe's",
            "category": {"name": "Diner"},
            "address_obj": {"address_string": "1 Main St, Austin, TX"},
            "distance": "0.42",
            "rating": 4.5,
            "ranking_data": {"ranking_string": "#3 of 120 Restaurants in Austin"},
            "price_level": "$$ - $$$"
        });
        let place = normalize_place(&record).unwrap();

        assert_eq!(place.address.as_deref(), Some("1 Main St, Austin, TX"));
        assert_eq!(place.distance, Some(Measure::from("0.42")));
        assert_eq!(place.rating.map(|r| r.to_string()), Some("4.5".to_string()));
        assert_eq!(
            place.ranking.as_deref(),
            Some("#3 of 120 Restaurants in Austin")
        );
        assert_eq!(place.price_level, Some(Measure::from("$$ - $$$")));
    }

    #[test]
    fn zero_distance_is_treated_as_absent() {
        let record = json!({
            "name": "Next Door",
            "category": {"name": "Cafe"},
            "distance": 0,
            "rating": 0.0
        });
        let place = normalize_place(&record).unwrap();
        assert!(place.distance.is_none());
        assert!(place.rating.is_none());
    }

    #[test]
    fn zero_distance_text_is_kept() {
        let record = json!({"name": "Next Door", "category": {"name": "Cafe"}, "distance": "0"});
        assert_eq!(
            normalize_place(&record).unwrap().distance,
            Some(Measure::from("0"))
        );
    }

    #[test]
    fn ignores_non_array_top_level_fields() {
        let payload = json!({
            "total": 2,
            "status": "ok",
            "restaurants": [{"name": "A", "category": {"name": "Diner"}}],
            "attractions": [{"name": "B", "category": {"name": "Park"}}]
        });
        let names: Vec<String> = normalize_payload(&payload)
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn top_level_array_of_record_lists() {
        let payload = json!([
            [{"name": "A", "category": {"name": "Diner"}}],
            {"name": "Ignored", "category": {"name": "Diner"}},
            [{"name": "B", "category": {"name": "Park"}}]
        ]);
        let names: Vec<String> = normalize_payload(&payload)
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn top_level_array_of_records_yields_nothing() {
        let payload = json!([{"name": "A", "category": {"name": "B"}}]);
        assert!(normalize_payload(&payload).unwrap().is_empty());
    }

    #[test]
    fn non_scalar_measures_are_dropped() {
        let record = json!({
            "name": "Odd",
            "category": {"name": "Cafe"},
            "distance": true,
            "rating": [5],
            "price_level": {"min": 1}
        });
        let place = normalize_place(&record).unwrap();
        assert!(place.distance.is_none());
        assert!(place.rating.is_none());
        assert!(place.price_level.is_none());
    }

    #[test]
    fn scalar_payload_is_malformed() {
        for payload in [json!(null), json!("oops"), json!(42)] {
            let err = normalize_payload(&payload).unwrap_err();
            assert!(matches!(err, PlacesError::MalformedResponse { .. }));
        }
    }
}
