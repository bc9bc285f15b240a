use std::ops::Range;

use crate::partition;
use crate::pivot::PivotPolicy;

/// Sorts `data` in place.
pub fn quick_sort<T, P>(data: &mut [T], policy: &mut P)
where
    T: Ord,
    P: PivotPolicy + ?Sized,
{
    quick_sort_observed(data, policy, |_| {});
}

/// One partition performed by the in-place driver, in absolute indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartitionStep {
    pub range: Range<usize>,
    /// Final position of the pivot.
    pub split: usize,
    /// Subranges deferred on the work stack when this step ran.
    pub pending: usize,
}

/// Same as [`quick_sort`], reporting every partition step.
pub fn quick_sort_observed<T, P, F>(data: &mut [T], policy: &mut P, mut observe: F)
where
    T: Ord,
    P: PivotPolicy + ?Sized,
    F: FnMut(PartitionStep),
{
    let mut pending: Vec<Range<usize>> = Vec::new();
    let mut range = 0..data.len();

    loop {
        while range.len() > 1 {
            let sub = &mut data[range.clone()];
            let offset = policy.select(sub.len());
            debug_assert!(offset < sub.len());
            sub.swap(0, offset);

            let split = range.start + partition::partition_first_pivot(sub);
            observe(PartitionStep {
                range: range.clone(),
                split,
                pending: pending.len(),
            });

            // Defer the larger side; the stack stays within log2(len).
            let left = range.start..split;
            let right = split + 1..range.end;
            let (smaller, larger) = if left.len() < right.len() {
                (left, right)
            } else {
                (right, left)
            };
            if larger.len() > 1 {
                pending.push(larger);
            }
            range = smaller;
        }

        match pending.pop() {
            Some(next) => range = next,
            None => return,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::pivot::{FirstPivot, RandomPivot};

    fn assert_sorts_like_std<P: PivotPolicy>(data: &[i64], policy: &mut P) {
        let mut actual = data.to_vec();
        quick_sort(&mut actual, policy);

        let mut expected = data.to_vec();
        expected.sort_unstable();

        assert_eq!(actual, expected, "input_len={}", data.len());
    }

    #[test]
    fn edge_cases() {
        let cases: [&[i64]; 8] = [
            &[],
            &[42],
            &[2, 1],
            &[1, 2, 3, 4, 5, 6],
            &[6, 5, 4, 3, 2, 1],
            &[7; 128],
            &[i64::MIN, 1, i64::MAX, 0, i64::MAX - 1, -2],
            &[5, 5, 3, 3, 1, 1, 4, 4, 2, 2, 0, 0],
        ];
        for case in cases {
            assert_sorts_like_std(case, &mut FirstPivot);
            assert_sorts_like_std(case, &mut RandomPivot::new(StdRng::seed_from_u64(9)));
        }
    }

    #[test]
    fn fixed_seed_random_cases() {
        let mut rng = StdRng::seed_from_u64(0x5EED_2026);
        for &size in &[3_usize, 8, 31, 64, 511, 2048] {
            let data: Vec<i64> = (0..size).map(|_| rng.random()).collect();
            assert_sorts_like_std(&data, &mut FirstPivot);
            assert_sorts_like_std(&data, &mut RandomPivot::new(StdRng::seed_from_u64(size as u64)));
        }
    }

    #[test]
    fn pending_stack_stays_logarithmic() {
        let mut rng = StdRng::seed_from_u64(0xBA5E_0001);
        let len = 1_usize << 15;
        let inputs: [Vec<i64>; 3] = [
            (0..len as i64).rev().collect(),
            (0..len as i64).collect(),
            (0..len).map(|_| rng.random_range(-1_000..1_000)).collect(),
        ];
        let bound = usize::BITS as usize - len.leading_zeros() as usize;

        for mut data in inputs {
            let mut deepest = 0usize;
            quick_sort_observed(&mut data, &mut FirstPivot, |step| {
                deepest = deepest.max(step.pending);
            });
            assert!(data.windows(2).all(|w| w[0] <= w[1]));
            assert!(deepest <= bound, "deepest={deepest} bound={bound}");
        }
    }

    #[test]
    fn observer_sees_pivot_positions() {
        let mut data = vec![3, 6, 2, 8, 2, 1];
        let mut seen = Vec::new();
        quick_sort_observed(&mut data, &mut FirstPivot, |step| seen.push(step));
        assert_eq!(data, vec![1, 2, 2, 3, 6, 8]);
        assert_eq!(
            seen[0],
            PartitionStep {
                range: 0..6,
                split: 3,
                pending: 0,
            }
        );
    }
}
