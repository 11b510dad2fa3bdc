use std::cmp::Ordering;

use crate::core::error::{ForecastError, Result};

/// Bounded accumulator of the `k` smallest distances seen so far.
///
/// Candidates must be fed in ascending index order. The buffer stays sorted
/// ascending; insertion uses strict comparisons, so a later candidate with a
/// distance equal to an earlier one never displaces or precedes it. Earlier
/// indices therefore win ties, matching a repeated scan for the first minimum.
///
/// Distances are compared with the IEEE total order after every NaN is
/// canonicalized to the positive quiet NaN, so NaN of either sign ranks after
/// every real distance, `+inf` included.
#[derive(Debug, Clone)]
pub struct TopKSelector {
    distances: Vec<f64>,
    indices: Vec<usize>,
    k: usize,
}

impl TopKSelector {
    pub fn new(k: usize) -> Self {
        Self {
            distances: Vec::with_capacity(k),
            indices: Vec::with_capacity(k),
            k,
        }
    }

    /// Offer a candidate. O(k) worst case, O(1) when it is rejected.
    #[inline]
    pub fn update(&mut self, dist: f64, index: usize) {
        if self.k == 0 {
            return;
        }
        // `inf - inf` yields a negative NaN, which total_cmp would put before -inf
        let dist = if dist.is_nan() { f64::NAN } else { dist };
        let len = self.distances.len();

        let mut pos = if len < self.k {
            self.distances.push(dist);
            self.indices.push(index);
            len
        } else {
            // Quick reject: candidate doesn't beat the worst of k best
            if dist.total_cmp(&self.distances[len - 1]) != Ordering::Less {
                return;
            }
            len - 1
        };

        // Shift larger entries right until the insertion point is found
        while pos > 0 && dist.total_cmp(&self.distances[pos - 1]) == Ordering::Less {
            self.distances[pos] = self.distances[pos - 1];
            self.indices[pos] = self.indices[pos - 1];
            pos -= 1;
        }

        self.distances[pos] = dist;
        self.indices[pos] = index;
    }

    /// Selected distances, ascending.
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// Selected indices, in the same order as [`Self::distances`].
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn into_indices(self) -> Vec<usize> {
        self.indices
    }
}

/// Indices of the `k` smallest entries of `distances`, ascending by distance.
///
/// Ties resolve to the lower index: `[2.0, 1.0, 1.0, 3.0]` with `k = 2` selects `[1, 2]`.
///
/// # Errors
/// `k > distances.len()`.
pub fn select_k_smallest(distances: &[f64], k: usize) -> Result<Vec<usize>> {
    if k > distances.len() {
        return Err(ForecastError::InvalidArgument(format!(
            "k = {k} exceeds the {} available candidates",
            distances.len()
        )));
    }
    let mut selector = TopKSelector::new(k);
    for (i, &d) in distances.iter().enumerate() {
        selector.update(d, i);
    }
    Ok(selector.into_indices())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reference selection: repeatedly take the first minimum among the unconsumed
    /// entries, marking each pick as consumed.
    fn scan_and_mark(distances: &[f64], k: usize) -> Vec<usize> {
        let mut consumed = vec![false; distances.len()];
        let mut out = Vec::with_capacity(k);
        for _ in 0..k {
            let mut best: Option<usize> = None;
            for (i, &d) in distances.iter().enumerate() {
                if consumed[i] {
                    continue;
                }
                match best {
                    Some(b) if d >= distances[b] => {}
                    _ => best = Some(i),
                }
            }
            let b = best.unwrap();
            consumed[b] = true;
            out.push(b);
        }
        out
    }

    #[test]
    fn test_tie_break_prefers_lower_index() {
        let idx = select_k_smallest(&[2.0, 1.0, 1.0, 3.0], 2).unwrap();
        assert_eq!(idx, vec![1, 2]);
    }

    #[test]
    fn test_all_equal_keeps_first_k() {
        let idx = select_k_smallest(&[0.5; 6], 3).unwrap();
        assert_eq!(idx, vec![0, 1, 2]);
    }

    #[test]
    fn test_sorted_ascending_by_distance() {
        let mut sel = TopKSelector::new(3);
        for (i, d) in [4.0, 0.5, 9.0, 2.0, 0.1, 3.0].into_iter().enumerate() {
            sel.update(d, i);
        }
        assert_eq!(sel.indices(), &[4, 1, 3]);
        assert_eq!(sel.distances(), &[0.1, 0.5, 2.0]);
    }

    #[test]
    fn test_k_equals_n_selects_everything() {
        let d = [3.0, 1.0, 2.0];
        let mut idx = select_k_smallest(&d, 3).unwrap();
        assert_eq!(idx, vec![1, 2, 0]);
        idx.sort_unstable();
        assert_eq!(idx, vec![0, 1, 2]);
    }

    #[test]
    fn test_k_zero_selects_nothing() {
        assert!(select_k_smallest(&[1.0, 2.0], 0).unwrap().is_empty());
        let mut sel = TopKSelector::new(0);
        sel.update(1.0, 0);
        assert!(sel.is_empty());
    }

    #[test]
    fn test_k_exceeds_candidates() {
        let err = select_k_smallest(&[1.0, 2.0], 3);
        assert!(matches!(err, Err(ForecastError::InvalidArgument(_))));
    }

    #[test]
    fn test_nan_ranks_last() {
        let idx = select_k_smallest(&[f64::NAN, 2.0, 1.0], 2).unwrap();
        assert_eq!(idx, vec![2, 1]);
    }

    #[test]
    fn test_negative_nan_ranks_last() {
        let neg_nan = -f64::NAN;
        assert!(neg_nan.is_sign_negative());
        assert_eq!(
            select_k_smallest(&[neg_nan, 2.0, 1.0], 2).unwrap(),
            vec![2, 1]
        );
        assert_eq!(
            select_k_smallest(&[neg_nan, f64::INFINITY, f64::NAN], 3).unwrap(),
            vec![1, 0, 2]
        );
    }

    #[test]
    fn test_infinite_input_distance_ranks_after_real() {
        use crate::core::distance_metric::DistanceMetric;
        use crate::metrics::euclidean::Euclidean;

        let d = Euclidean::distance(&[f32::INFINITY], &[f32::INFINITY]);
        assert!(d.is_nan());
        let mut sel = TopKSelector::new(1);
        sel.update(d, 0);
        sel.update(5.0, 1);
        assert_eq!(sel.indices(), &[1]);
        assert_eq!(sel.distances(), &[5.0]);
    }

    #[test]
    fn test_matches_scan_and_mark_with_many_ties() {
        let distances: Vec<f64> = (0..200).map(|i| ((i * 37) % 11) as f64).collect();
        for k in [1, 2, 5, 17, 60, 200] {
            assert_eq!(
                select_k_smallest(&distances, k).unwrap(),
                scan_and_mark(&distances, k),
                "k = {k}"
            );
        }
    }
}
