// Unit tests for the predictor.
//
// Runs predictions against the reference dataset: reproducibility, the
// [0, 5] bound for cosine weights, undefined results, self-inclusion, and
// lookup errors for unknown identifiers.

use usercf::error::LookupError;
use usercf::predict::{predict, predict_with, PredictOptions};
use usercf::ratings::reference::reference_matrix;
use usercf::ratings::RatingMatrix;
use usercf::similarity::{compute_similarity, Metric};

const EXCLUDE_SELF: PredictOptions = PredictOptions {
    include_self: false,
};

// ============================================================
// Reference scenario
// ============================================================

#[test]
fn cosine_prediction_is_reproducible() {
    let ratings = reference_matrix().unwrap();
    let sim = compute_similarity(&ratings, Metric::Cosine);

    let first = predict("user_304", "2533", &sim, &ratings).unwrap();
    let second = predict("user_304", "2533", &sim, &ratings).unwrap();
    assert_eq!(first, second);

    // Recomputing the similarity from scratch changes nothing either
    let again = compute_similarity(&ratings, Metric::Cosine);
    let third = predict("user_304", "2533", &again, &ratings).unwrap();
    assert_eq!(first.score, third.score);
}

#[test]
fn cosine_prediction_reference_value() {
    let ratings = reference_matrix().unwrap();
    let sim = compute_similarity(&ratings, Metric::Cosine);
    let p = predict("user_304", "2533", &sim, &ratings).unwrap();

    let score = p.score.unwrap();
    assert!((score - 2.059_620_462_454).abs() < 1e-9, "got {score}");
    // Every user rated 2533, user_304 included
    assert_eq!(p.raters, 8);
    assert_eq!(p.method, Metric::Cosine);
}

#[test]
fn pearson_prediction_reference_value() {
    let ratings = reference_matrix().unwrap();
    let sim = compute_similarity(&ratings, Metric::Pearson);
    let p = predict("user_304", "2533", &sim, &ratings).unwrap();

    let score = p.score.unwrap();
    assert!((score - 0.476_665_518_452).abs() < 1e-9, "got {score}");
    assert_eq!(p.method, Metric::Pearson);
}

// ============================================================
// Bounds
// ============================================================

#[test]
fn cosine_predictions_stay_within_rating_range() {
    let ratings = reference_matrix().unwrap();
    let sim = compute_similarity(&ratings, Metric::Cosine);

    for user in ratings.users() {
        for item in ratings.items() {
            let p = predict(user, item, &sim, &ratings).unwrap();
            let score = p.score.expect("every reference item has raters");
            assert!(
                (0.0..=5.0).contains(&score),
                "cosine prediction for {user}/{item} out of range: {score}"
            );
        }
    }
}

#[test]
fn pearson_predictions_can_leave_rating_range() {
    // Negative weights mean the result isn't a convex combination of ratings
    let ratings = reference_matrix().unwrap();
    let sim = compute_similarity(&ratings, Metric::Pearson);
    let p = predict("user_304", "1717", &sim, &ratings).unwrap();
    let score = p.score.unwrap();
    assert!(score < 0.0, "expected a negative prediction, got {score}");
}

// ============================================================
// Undefined results
// ============================================================

#[test]
fn item_without_raters_is_undefined() {
    let ratings = RatingMatrix::new(
        vec!["rated".into(), "unrated".into()],
        vec!["a".into(), "b".into()],
        vec![vec![Some(3.0), Some(4.0)], vec![None, None]],
    )
    .unwrap();

    for metric in Metric::ALL {
        let sim = compute_similarity(&ratings, metric);
        let p = predict("a", "unrated", &sim, &ratings).unwrap();
        assert_eq!(p.score, None, "{metric} should be undefined");
        assert_eq!(p.raters, 0);
    }
}

#[test]
fn only_rater_is_self_and_excluded() {
    let solo = RatingMatrix::new(
        vec!["x".into()],
        vec!["me".into(), "other".into()],
        vec![vec![Some(5.0), None]],
    )
    .unwrap();
    let sim = compute_similarity(&solo, Metric::Cosine);

    let included = predict("me", "x", &sim, &solo).unwrap();
    assert_eq!(included.score, Some(5.0));

    let excluded = predict_with("me", "x", &sim, &solo, &EXCLUDE_SELF).unwrap();
    assert_eq!(excluded.score, None);
    assert_eq!(excluded.raters, 0);
}

// ============================================================
// Self-inclusion
// ============================================================

#[test]
fn self_rating_pulls_prediction_toward_own_rating() {
    let ratings = reference_matrix().unwrap();
    let sim = compute_similarity(&ratings, Metric::Cosine);

    // user_304 rated 4069 a 4
    let own = ratings.rating("4069", "user_304").unwrap().unwrap();
    let with_self = predict("user_304", "4069", &sim, &ratings)
        .unwrap()
        .score
        .unwrap();
    let without_self = predict_with("user_304", "4069", &sim, &ratings, &EXCLUDE_SELF)
        .unwrap()
        .score
        .unwrap();

    assert!((with_self - own).abs() <= (without_self - own).abs());
}

#[test]
fn self_exclusion_is_irrelevant_for_unrated_items() {
    let ratings = reference_matrix().unwrap();
    let sim = compute_similarity(&ratings, Metric::Cosine);
    let a = predict("user_304", "1241", &sim, &ratings).unwrap();
    let b = predict_with("user_304", "1241", &sim, &ratings, &EXCLUDE_SELF).unwrap();
    assert_eq!(a, b);
}

// ============================================================
// Lookup errors
// ============================================================

#[test]
fn unknown_user_is_a_lookup_error() {
    let ratings = reference_matrix().unwrap();
    let sim = compute_similarity(&ratings, Metric::Cosine);
    let err = predict("user_999", "2533", &sim, &ratings).unwrap_err();
    assert_eq!(err, LookupError::UnknownUser("user_999".into()));
    assert_eq!(err.to_string(), "unknown user: user_999");
}

#[test]
fn unknown_item_is_a_lookup_error() {
    let ratings = reference_matrix().unwrap();
    let sim = compute_similarity(&ratings, Metric::Cosine);
    let err = predict("user_304", "9999", &sim, &ratings).unwrap_err();
    assert_eq!(err, LookupError::UnknownItem("9999".into()));
}
