//! Distance functions between direction sequences.
//!
//! Two interchangeable scores are provided, selected by [`ScoringMethod`]:
//! the legacy fixed-window distance and the weighted edit distance. They
//! can rank the same candidates differently.

use crate::config::{MatchingConfig, ScoringMethod};
use crate::math::circular_bin_difference;

/// Penalty per token of length difference in the legacy distance.
pub const LEGACY_LENGTH_PENALTY: f64 = 0.5;

/// Score `input` against `pattern` with the method chosen in `matching`.
#[must_use]
pub fn sequence_distance(
    input: &[usize],
    pattern: &[usize],
    bins: usize,
    matching: &MatchingConfig,
) -> f64 {
    match matching.method {
        ScoringMethod::Legacy => legacy_distance(input, pattern, bins),
        ScoringMethod::WeightedEdit => weighted_edit_distance(
            input,
            pattern,
            bins,
            matching.insert_delete_cost,
            matching.substitution_scale,
        ),
    }
}

/// Index-aligned circular difference plus a linear length penalty.
///
/// Past the end of the shorter sequence its last element is repeated. An
/// empty sequence has no element to repeat, so pairing one with a
/// non-empty sequence scores `f64::INFINITY`.
#[must_use]
pub fn legacy_distance(a: &[usize], b: &[usize], bins: usize) -> f64 {
    let (Some(&a_last), Some(&b_last)) = (a.last(), b.last()) else {
        return if a.is_empty() && b.is_empty() {
            0.0
        } else {
            f64::INFINITY
        };
    };

    let max_len = a.len().max(b.len());
    let mut sum = 0.0;
    for i in 0..max_len {
        let da = a.get(i).copied().unwrap_or(a_last);
        let db = b.get(i).copied().unwrap_or(b_last);
        sum += circular_bin_difference(da, db, bins) as f64;
    }

    sum + a.len().abs_diff(b.len()) as f64 * LEGACY_LENGTH_PENALTY
}

/// Weighted Levenshtein distance over direction tokens.
///
/// Insertions and deletions cost `insert_delete_cost`. A substitution costs
/// the circular bin difference times `substitution_scale`.
#[must_use]
pub fn weighted_edit_distance(
    a: &[usize],
    b: &[usize],
    bins: usize,
    insert_delete_cost: f64,
    substitution_scale: f64,
) -> f64 {
    let n = a.len();
    let m = b.len();

    if n == 0 {
        return m as f64 * insert_delete_cost;
    }
    if m == 0 {
        return n as f64 * insert_delete_cost;
    }

    // Two rows of the (n+1) x (m+1) table.
    let mut prev: Vec<f64> = (0..=m).map(|j| j as f64 * insert_delete_cost).collect();
    let mut curr = vec![0.0; m + 1];

    for (i, &ai) in a.iter().enumerate() {
        curr[0] = (i + 1) as f64 * insert_delete_cost;

        for (j, &bj) in b.iter().enumerate() {
            let sub_cost = circular_bin_difference(ai, bj, bins) as f64 * substitution_scale;

            let delete = prev[j + 1] + insert_delete_cost;
            let insert = curr[j] + insert_delete_cost;
            let substitute = prev[j] + sub_cost;

            curr[j + 1] = delete.min(insert).min(substitute);
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[m]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_self_distance_zero() {
        let seq = [0, 2, 3, 4, 6];
        assert_eq!(legacy_distance(&seq, &seq, 8), 0.0);
        assert_eq!(weighted_edit_distance(&seq, &seq, 8, 0.75, 1.0), 0.0);
    }

    #[test]
    fn test_exact_match_preferred() {
        let input = [0, 0, 0, 0];
        let exact = [0, 0, 0, 0];
        let wrong = [2, 2, 2, 2];

        assert!(legacy_distance(&input, &exact, 8) < legacy_distance(&input, &wrong, 8));
        assert_relative_eq!(legacy_distance(&input, &wrong, 8), 8.0);

        let config = MatchingConfig::default();
        assert!(
            sequence_distance(&input, &exact, 8, &config)
                < sequence_distance(&input, &wrong, 8, &config)
        );
    }

    #[test]
    fn test_legacy_edge_extension() {
        // Index 2 compares a's last element (2) against b[2] = 2.
        assert_relative_eq!(legacy_distance(&[0, 2], &[0, 2, 2], 8), 0.5);
        // a's last element 0 is compared against 2 and 4.
        assert_relative_eq!(legacy_distance(&[0], &[0, 2, 4], 8), 2.0 + 4.0 + 1.0);
    }

    #[test]
    fn test_legacy_circular_wrap() {
        assert_relative_eq!(legacy_distance(&[0], &[7], 8), 1.0);
        assert_relative_eq!(legacy_distance(&[4], &[0], 8), 4.0);
    }

    #[test]
    fn test_legacy_empty_sequences() {
        assert_eq!(legacy_distance(&[], &[], 8), 0.0);
        assert!(legacy_distance(&[], &[1, 2], 8).is_infinite());
        assert!(legacy_distance(&[3], &[], 8).is_infinite());
    }

    #[test]
    fn test_edit_empty_base_cases() {
        assert_relative_eq!(weighted_edit_distance(&[], &[1, 2, 3], 8, 0.75, 1.0), 2.25);
        assert_relative_eq!(weighted_edit_distance(&[1, 2], &[], 8, 0.5, 1.0), 1.0);
    }

    #[test]
    fn test_edit_tolerates_extra_token() {
        assert_relative_eq!(weighted_edit_distance(&[0, 2], &[0, 2, 2], 8, 0.75, 1.0), 0.75);
        assert_relative_eq!(
            weighted_edit_distance(&[0, 2, 3, 4, 6], &[0, 2, 4, 6], 8, 0.75, 1.0),
            0.75
        );
    }

    #[test]
    fn test_edit_prefers_indel_over_large_substitution() {
        // Substituting 4 for 0 costs 4, delete + insert costs 1.5.
        assert_relative_eq!(weighted_edit_distance(&[4], &[0], 8, 0.75, 1.0), 1.5);
        // A neighbouring bin is cheaper to substitute.
        assert_relative_eq!(weighted_edit_distance(&[1], &[0], 8, 0.75, 1.0), 1.0);
    }

    #[test]
    fn test_edit_substitution_scale() {
        assert_relative_eq!(weighted_edit_distance(&[0, 1], &[0, 2], 8, 5.0, 0.5), 0.5);
        assert_relative_eq!(weighted_edit_distance(&[0, 1], &[0, 2], 8, 5.0, 2.0), 2.0);
    }

    #[test]
    fn test_edit_symmetry() {
        let a = [2, 0, 7, 6, 4];
        let b = [0, 2, 4, 6];
        assert_relative_eq!(
            weighted_edit_distance(&a, &b, 8, 0.75, 1.0),
            weighted_edit_distance(&b, &a, 8, 0.75, 1.0),
            epsilon = 1e-12
        );
        assert_relative_eq!(weighted_edit_distance(&a, &b, 8, 0.75, 1.0), 3.75, epsilon = 1e-12);
    }

    #[test]
    fn test_method_dispatch() {
        let a = [2, 0, 7, 6, 4];
        let b = [0, 2, 4, 6];
        let legacy = MatchingConfig::legacy();
        assert_relative_eq!(sequence_distance(&a, &b, 8, &legacy), 9.5);
        let edit = MatchingConfig::default();
        assert_relative_eq!(sequence_distance(&a, &b, 8, &edit), 3.75, epsilon = 1e-12);
    }
}
