//! Resolver ordering, filtering, and argument validation.

use rstest::{fixture, rstest};

use super::*;

fn point(latitude: f64, longitude: f64) -> GeoPoint {
    GeoPoint::new(latitude, longitude).expect("fixture coordinates are valid")
}

fn candidate(id: &str, latitude: f64, longitude: f64, eligible: bool) -> Candidate {
    Candidate::new(
        CandidateId::new(id).expect("fixture id is valid"),
        point(latitude, longitude),
        eligible,
    )
}

fn ids(result: &ProximityResult) -> Vec<&str> {
    result.iter().map(|m| m.id().as_str()).collect()
}

#[fixture]
fn origin() -> GeoPoint {
    point(41.0, 69.0)
}

#[fixture]
fn pair() -> Vec<Candidate> {
    vec![
        candidate("A", 41.0, 69.0, true),
        candidate("B", 41.01, 69.01, true),
    ]
}

#[rstest]
fn nearest_candidate_at_origin_is_returned(origin: GeoPoint, pair: Vec<Candidate>) {
    let query = ProximityQuery::new(origin, 5_000.0, 1).expect("valid query");

    let result = resolve(&pair, &query).expect("match expected");

    assert_eq!(ids(&result), vec!["A"]);
    assert_eq!(result.matches()[0].distance_meters(), 0.0);
}

#[rstest]
fn far_origin_reports_not_found(pair: Vec<Candidate>) {
    let query = ProximityQuery::new(point(42.0, 70.0), 5_000.0, 1).expect("valid query");

    let err = resolve(&pair, &query).expect_err("nothing within radius");

    assert_eq!(err, ProximityError::not_found());
    assert_eq!(err.to_string(), NO_CANDIDATE_WITHIN_RADIUS);
}

#[rstest]
fn ineligible_candidates_are_skipped(origin: GeoPoint) {
    let candidates = vec![
        candidate("A", 41.0, 69.0, true),
        candidate("B", 41.01, 69.01, false),
    ];
    let query = ProximityQuery::new(origin, 2_000.0, 2).expect("valid query");

    let result = resolve(&candidates, &query).expect("match expected");

    assert_eq!(ids(&result), vec!["A"]);
}

#[rstest]
fn equal_distances_are_ordered_by_id(origin: GeoPoint) {
    let candidates = vec![
        candidate("C", 41.01, 69.01, true),
        candidate("B", 41.01, 69.01, true),
    ];
    let query = ProximityQuery::new(origin, 5_000.0, 2).expect("valid query");

    let result = resolve(&candidates, &query).expect("matches expected");

    assert_eq!(ids(&result), vec!["B", "C"]);
    assert_eq!(
        result.matches()[0].distance_meters(),
        result.matches()[1].distance_meters()
    );
}

#[rstest]
fn results_are_sorted_and_truncated(origin: GeoPoint) {
    let candidates = vec![
        candidate("far", 41.03, 69.0, true),
        candidate("near", 41.001, 69.0, true),
        candidate("mid", 41.02, 69.0, true),
        candidate("outside", 41.5, 69.0, true),
    ];
    let query = ProximityQuery::new(origin, 10_000.0, 2).expect("valid query");

    let result = resolve(&candidates, &query).expect("matches expected");

    assert_eq!(ids(&result), vec!["near", "mid"]);
}

#[rstest]
fn returned_matches_never_exceed_radius(origin: GeoPoint) {
    let candidates: Vec<Candidate> = (0..40_u32)
        .map(|i| {
            let offset = f64::from(i) * 0.005;
            candidate(&format!("c{i:02}"), 41.0 + offset, 69.0 - offset, i % 3 != 0)
        })
        .collect();
    let query = ProximityQuery::new(origin, 3_000.0, 100).expect("valid query");

    let result = resolve(&candidates, &query).expect("matches expected");

    assert!(result.iter().all(|m| m.distance_meters() <= 3_000.0));
    assert!(result.iter().all(|m| m.candidate().is_eligible()));
    let distances: Vec<f64> = result.iter().map(ProximityMatch::distance_meters).collect();
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));
}

#[rstest]
#[case(0.0)]
#[case(-1.0)]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
fn non_positive_radius_is_rejected(origin: GeoPoint, #[case] radius: f64) {
    let err = ProximityQuery::new(origin, radius, 1).expect_err("radius must be positive");
    assert!(matches!(err, ProximityError::InvalidArgument { .. }));
}

#[rstest]
fn zero_limit_is_rejected(origin: GeoPoint) {
    let err = ProximityQuery::new(origin, 1_000.0, 0).expect_err("limit must be positive");
    assert!(matches!(err, ProximityError::InvalidArgument { .. }));
}

#[rstest]
fn handcrafted_invalid_query_is_rejected_before_evaluation(origin: GeoPoint) {
    let query = ProximityQuery {
        origin,
        radius_meters: -5.0,
        limit: 1,
    };

    let err = resolve(&[], &query).expect_err("invalid radius");

    assert!(matches!(err, ProximityError::InvalidArgument { .. }));
}

#[rstest]
fn empty_snapshot_reports_not_found(origin: GeoPoint) {
    let query = ProximityQuery::nearest(origin, 5_000.0).expect("valid query");
    assert_eq!(resolve(&[], &query), Err(ProximityError::not_found()));
}

#[rstest]
fn all_ineligible_snapshot_reports_not_found(origin: GeoPoint) {
    let candidates = vec![
        candidate("A", 41.0, 69.0, false),
        candidate("B", 41.01, 69.01, false),
    ];
    let query = ProximityQuery::nearest(origin, 5_000.0).expect("valid query");

    assert_eq!(resolve(&candidates, &query), Err(ProximityError::not_found()));
}

#[rstest]
fn duplicate_ids_are_kept(origin: GeoPoint) {
    let candidates = vec![
        candidate("A", 41.01, 69.01, true),
        candidate("A", 41.0, 69.0, true),
    ];
    let query = ProximityQuery::new(origin, 5_000.0, 5).expect("valid query");

    let result = resolve(&candidates, &query).expect("matches expected");

    assert_eq!(ids(&result), vec!["A", "A"]);
    assert_eq!(result.matches()[0].distance_meters(), 0.0);
}

#[rstest]
#[case("")]
#[case("   ")]
fn blank_candidate_ids_are_rejected(#[case] raw: &str) {
    assert!(matches!(
        CandidateId::new(raw),
        Err(ProximityError::InvalidArgument { .. })
    ));
}

#[rstest]
fn default_policy_uses_category_radii(origin: GeoPoint) {
    let policy = ProximityPolicy::default();

    let branch = policy
        .nearest_query(CandidateCategory::Branch, origin)
        .expect("valid branch query");
    let courier = policy
        .nearest_query(CandidateCategory::Courier, origin)
        .expect("valid courier query");

    assert_eq!(branch.radius_meters(), 10_000.0);
    assert_eq!(courier.radius_meters(), 5_000.0);
    assert_eq!(branch.limit(), 1);
}

#[rstest]
fn policy_rejects_non_positive_radius() {
    assert!(ProximityPolicy::new(10_000.0, 0.0).is_err());
    assert!(ProximityPolicy::new(-1.0, 5_000.0).is_err());
}
