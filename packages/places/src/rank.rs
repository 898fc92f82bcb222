//! Orders places by distance.
//!
//! Distances are compared numerically. A place whose distance is missing or
//! not numeric compares *equal* to every other place rather than sorting to
//! either end. Because that comparison is not a total order, the resulting
//! order depends on the sorting algorithm; [`rank`] uses the same TimSort
//! steps as a JavaScript engine so the ordering matches what a browser
//! client would show for the same payload.

use std::cmp::Ordering;

use nearby_places_models::Place;

use crate::sort::tim_sort;

/// `NaN` compares equal to everything.
fn compare_distances(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Sorts places by ascending [`Place::distance_value`].
#[must_use]
pub fn rank(places: Vec<Place>) -> Vec<Place> {
    let distances: Vec<f64> = places.iter().map(Place::distance_value).collect();
    let mut order: Vec<usize> = (0..places.len()).collect();
    tim_sort(&mut order, |&a, &b| compare_distances(distances[a], distances[b]));

    let mut slots: Vec<Option<Place>> = places.into_iter().map(Some).collect();
    order.into_iter().filter_map(|i| slots[i].take()).collect()
}
