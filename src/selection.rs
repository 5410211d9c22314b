//! Roulette wheel parent selection over cumulative fitness weights.

use crate::constants::{THESEUS_WEIGHT_FLOOR, THESEUS_WEIGHT_SCALE};
use log::warn;
use rand::{Rng, RngCore};

/// Turn raw fitness scores into a non-decreasing cumulative weight for every score.
///
/// Each score claims `score / total * THESEUS_WEIGHT_SCALE + THESEUS_WEIGHT_FLOOR` of the wheel,
/// so even the worst individual keeps a sliver of a chance. Negative scores (the fitness floor)
/// count as zero. When no score is positive there is nothing to be proportional to, and every
/// individual gets an equal share instead.
pub fn normalize_weights(scores: &[f64]) -> Vec<f64> {
    let total = scores.iter().map(|s| s.max(0.)).sum::<f64>();
    let uniform = !(total > 0.);
    if uniform && !scores.is_empty() {
        warn!(
            "no positive fitness among {} scores, falling back to uniform weights",
            scores.len()
        );
    }

    let len = scores.len() as f64;
    scores
        .iter()
        .scan(0., |acc, score| {
            let share = if uniform {
                1. / len
            } else {
                score.max(0.) / total
            };
            *acc += share * THESEUS_WEIGHT_SCALE + THESEUS_WEIGHT_FLOOR;
            Some(*acc)
        })
        .collect()
}

/// Draw an integer uniformly from `[0, ceil(last weight))` and return the index of the first
/// cumulative weight at least as large. None means the weights could not have come from
/// [normalize_weights]: empty, non-positive, or not a number.
pub fn select(weights: &[f64], rng: &mut impl RngCore) -> Option<usize> {
    let bound = weights.last()?.ceil();
    if !(bound >= 1.) {
        return None;
    }

    let draw = rng.random_range(0..bound as u64) as f64;
    weights.iter().position(|&weight| draw <= weight)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{assert_f64_approx, random::WyRng};
    use proptest::prelude::*;

    #[test]
    fn test_normalize_weights() {
        let weights = normalize_weights(&[1., 3., 0., 6.]);
        let expected = [10.5, 41., 41.5, 102.];
        assert_eq!(expected.len(), weights.len());
        for (e, w) in expected.iter().zip(&weights) {
            assert_f64_approx!(*e, *w);
        }
    }

    #[test]
    fn test_normalize_weights_floor_scores() {
        // the floored individual keeps the minimum share and the total is unchanged
        let weights = normalize_weights(&[-1., 4., 4.]);
        assert_f64_approx!(0.5, weights[0]);
        assert_f64_approx!(51., weights[1]);
        assert_f64_approx!(101.5, weights[2]);
    }

    #[test]
    fn test_normalize_weights_degenerate() {
        for scores in [vec![-1.; 4], vec![0.; 4], vec![-1., 0., -1., 0.]] {
            let weights = normalize_weights(&scores);
            for (idx, w) in weights.iter().enumerate() {
                assert_f64_approx!((idx + 1) as f64 * 25.5, *w);
            }
        }
        assert!(normalize_weights(&[]).is_empty());
    }

    #[test]
    fn test_select_malformed() {
        let mut rng = WyRng::seeded(0);
        assert_eq!(None, select(&[], &mut rng));
        assert_eq!(None, select(&[0.], &mut rng));
        assert_eq!(None, select(&[-3., -2.], &mut rng));
        assert_eq!(None, select(&[f64::NAN], &mut rng));
    }

    #[test]
    fn test_select_bias() {
        let mut rng = WyRng::seeded(17);
        let weights = normalize_weights(&[1., 1., 98.]);
        let mut counts = [0usize; 3];
        for _ in 0..10_000 {
            counts[select(&weights, &mut rng).unwrap()] += 1;
        }
        assert!(counts[2] > counts[0] * 10, "{counts:?}");
        assert!(counts[2] > counts[1] * 10, "{counts:?}");
        assert!(counts[0] > 0 && counts[1] > 0, "{counts:?}");
    }

    #[test]
    fn test_select_uniform_fallback() {
        let mut rng = WyRng::seeded(23);
        let weights = normalize_weights(&[-1.; 4]);
        let mut counts = [0usize; 4];
        for _ in 0..10_000 {
            counts[select(&weights, &mut rng).unwrap()] += 1;
        }
        for count in counts {
            assert!((2_000..3_000).contains(&count), "{counts:?}");
        }
    }

    proptest! {
        #[test]
        fn prop_weights_non_decreasing(scores in prop::collection::vec(-1f64..1000., 1..200)) {
            let weights = normalize_weights(&scores);
            prop_assert_eq!(scores.len(), weights.len());
            prop_assert!(weights.windows(2).all(|w| w[0] <= w[1]));
            prop_assert!(weights[0] >= THESEUS_WEIGHT_FLOOR);

            let expected = THESEUS_WEIGHT_SCALE + THESEUS_WEIGHT_FLOOR * scores.len() as f64;
            let last = weights[weights.len() - 1];
            prop_assert!((expected - last).abs() < 1e-6, "{} !~ {}", expected, last);
        }

        #[test]
        fn prop_select_in_range(
            scores in prop::collection::vec(-1f64..1000., 1..200),
            seed in any::<u64>(),
        ) {
            let weights = normalize_weights(&scores);
            let mut rng = WyRng::seeded(seed);
            for _ in 0..20 {
                let idx = select(&weights, &mut rng);
                prop_assert!(idx.is_some_and(|idx| idx < weights.len()));
            }
        }
    }
}
