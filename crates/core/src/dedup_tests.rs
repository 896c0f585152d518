//! Tests for proximity grouping and tie-break determinism.

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use super::*;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

fn loc(name: &str, lat: f64, lng: f64, offset_secs: i64) -> Location {
    Location::new(Uuid::new_v4(), name.to_owned(), lat, lng, t0() + Duration::seconds(offset_secs))
}

const T: f64 = crate::DEFAULT_PROXIMITY_THRESHOLD_DEG;

#[test]
fn empty_input_yields_no_groups() {
    assert!(detect_duplicate_groups(&[], T).is_empty());
}

#[test]
fn single_location_yields_no_groups() {
    let only = loc("solo", 44.97, -93.26, 0);
    assert!(detect_duplicate_groups(&[only], T).is_empty());
}

#[test]
fn lat_delta_just_under_threshold_is_grouped() {
    let a = loc("a", 40.0, -73.0, 0);
    let b = loc("b", 40.00009, -73.0, 1);
    let groups = detect_duplicate_groups(&[a.clone(), b.clone()], T);
    assert_eq!(groups, vec![DuplicateGroup::new(a.id, vec![b.id])]);
}

#[test]
fn lat_delta_just_over_threshold_is_not_grouped() {
    let a = loc("a", 40.0, -73.0, 0);
    let b = loc("b", 40.00011, -73.0, 1);
    assert!(detect_duplicate_groups(&[a, b], T).is_empty());
}

#[test]
fn earliest_created_is_kept_regardless_of_input_order() {
    let first = loc("t1", 51.5007, -0.1246, 0);
    let second = loc("t2", 51.5007, -0.1246, 60);
    let third = loc("t3", 51.5007, -0.1246, 120);

    let orders = [
        vec![first.clone(), second.clone(), third.clone()],
        vec![third.clone(), second.clone(), first.clone()],
        vec![second.clone(), third.clone(), first.clone()],
    ];
    for input in orders {
        let groups = detect_duplicate_groups(&input, T);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].kept_id, first.id);
        assert_eq!(groups[0].redundant_ids, vec![second.id, third.id]);
    }
}

#[test]
fn identical_timestamps_keep_lowest_id() {
    let mut a = loc("a", 10.0, 10.0, 0);
    let mut b = loc("b", 10.0, 10.0, 0);
    a.id = Uuid::from_u128(2);
    b.id = Uuid::from_u128(1);
    let groups = detect_duplicate_groups(&[a.clone(), b.clone()], T);
    assert_eq!(groups, vec![DuplicateGroup::new(b.id, vec![a.id])]);
}

#[test]
fn isolated_location_is_in_no_group() {
    let a = loc("a", 48.8584, 2.2945, 0);
    let b = loc("b", 48.85841, 2.29451, 1);
    let far = loc("far", 48.8606, 2.3376, 2);
    let groups = detect_duplicate_groups(&[a, b, far.clone()], T);
    assert_eq!(groups.len(), 1);
    assert!(groups.iter().all(|g| g.kept_id != far.id && !g.redundant_ids.contains(&far.id)));
}

#[test]
fn matches_are_against_anchor_only() {
    // b is near a, c is near b but not near a.
    let a = loc("a", 0.0, 0.0, 0);
    let b = loc("b", 0.00008, 0.0, 1);
    let c = loc("c", 0.00016, 0.0, 2);
    let groups = detect_duplicate_groups(&[a.clone(), b.clone(), c.clone()], T);
    assert_eq!(groups, vec![DuplicateGroup::new(a.id, vec![b.id])]);
}

#[test]
fn claimed_rows_never_anchor_a_second_group() {
    let a = loc("a", 0.0, 0.0, 0);
    let b = loc("b", 0.00005, 0.0, 1);
    let c = loc("c", 0.00012, 0.0, 2);
    // c is near b, but b was already claimed by a, and c is too far from a.
    let groups = detect_duplicate_groups(&[a.clone(), b.clone(), c], T);
    assert_eq!(groups, vec![DuplicateGroup::new(a.id, vec![b.id])]);
}

#[test]
fn separate_clusters_form_separate_groups() {
    let a1 = loc("a1", 10.0, 10.0, 0);
    let b1 = loc("b1", 20.0, 20.0, 1);
    let a2 = loc("a2", 10.00001, 10.00001, 2);
    let b2 = loc("b2", 20.00001, 19.99999, 3);
    let groups = detect_duplicate_groups(&[a1.clone(), b1.clone(), a2.clone(), b2.clone()], T);
    assert_eq!(
        groups,
        vec![DuplicateGroup::new(a1.id, vec![a2.id]), DuplicateGroup::new(b1.id, vec![b2.id])]
    );
}

#[test]
fn group_serializes_camel_case() {
    let group = DuplicateGroup::new(Uuid::from_u128(1), vec![Uuid::from_u128(2)]);
    let json = serde_json::to_value(&group).unwrap();
    assert!(json.get("keptId").is_some());
    assert!(json.get("redundantIds").is_some());
}
