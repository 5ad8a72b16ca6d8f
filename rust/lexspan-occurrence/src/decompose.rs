//! Decomposition of a position set into maximal contiguous runs.

use std::ops::RangeInclusive;

/// Splits an ascending set of positions into the minimal ordered list of
/// inclusive ranges covering exactly that set.
///
/// Isolated points become `p..=p`; every maximal run of consecutive integers
/// becomes a single range. The output ranges are pairwise disjoint and no two
/// neighbours are adjacent, so none can be merged further.
///
/// An empty input yields an empty list.
///
/// # Panics
///
/// Panics if the input is not strictly ascending.
///
/// # Example
///
/// ```rust
/// use lexspan_occurrence::decompose_points;
///
/// let runs = decompose_points([2, 3, 4, 7, 9, 10]);
/// assert_eq!(runs, vec![2..=4, 7..=7, 9..=10]);
/// ```
pub fn decompose_points<I>(points: I) -> Vec<RangeInclusive<u32>>
where
    I: IntoIterator<Item = u32>,
{
    let mut points = points.into_iter();
    let Some(first) = points.next() else {
        return Vec::new();
    };

    let mut runs = Vec::new();
    let mut run_start = first;
    let mut run_end = first;
    for point in points {
        assert!(point > run_end, "positions must be strictly ascending");
        if point - run_end != 1 {
            runs.push(run_start..=run_end);
            run_start = point;
        }
        run_end = point;
    }
    runs.push(run_start..=run_end);
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_basic_runs() {
        assert!(decompose_points(std::iter::empty()).is_empty());
        assert_eq!(decompose_points([5]), vec![5..=5]);
        assert_eq!(decompose_points([5, 6, 7]), vec![5..=7]);
        assert_eq!(decompose_points([1, 3, 5]), vec![1..=1, 3..=3, 5..=5]);
        assert_eq!(
            decompose_points([0, 1, 4, 5, 6, 10, u32::MAX - 1, u32::MAX]),
            vec![0..=1, 4..=6, 10..=10, u32::MAX - 1..=u32::MAX]
        );
    }

    #[test]
    #[should_panic]
    fn test_rejects_unsorted_input() {
        decompose_points([4, 2]);
    }

    #[test]
    #[should_panic]
    fn test_rejects_duplicates() {
        decompose_points([4, 4]);
    }

    #[test]
    fn test_random_sets_are_covered_minimally() {
        fastrand::seed(60_311);
        for _ in 0..500 {
            let count = fastrand::usize(1..60);
            let set = (0..count)
                .map(|_| fastrand::u32(0..120))
                .collect::<BTreeSet<_>>();
            let runs = decompose_points(set.iter().copied());

            let covered = runs.iter().flat_map(|r| r.clone()).collect::<Vec<_>>();
            assert_eq!(covered, set.iter().copied().collect::<Vec<_>>());

            for pair in runs.windows(2) {
                // Disjoint, ordered and separated by at least one missing point.
                assert!(*pair[0].end() + 1 < *pair[1].start(), "{runs:?}");
            }
        }
    }
}
