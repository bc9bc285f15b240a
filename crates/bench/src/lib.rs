use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::time::Duration;

use criterion::BenchmarkGroup;
use criterion::measurement::Measurement;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const SMALL_RUNTIME_SAMPLE_SIZE: usize = 15;
const SMALL_RUNTIME_WARM_UP_MS: u64 = 100;
const SMALL_RUNTIME_MEASURE_MS: u64 = 200;
const MEDIUM_RUNTIME_SAMPLE_SIZE: usize = 15;
const MEDIUM_RUNTIME_WARM_UP_MS: u64 = 500;
const MEDIUM_RUNTIME_MEASURE_MS: u64 = 1000;
const LARGE_RUNTIME_SAMPLE_SIZE: usize = 10;
const LARGE_RUNTIME_WARM_UP_MS: u64 = 800;
const LARGE_RUNTIME_MEASURE_MS: u64 = 1500;
pub const RNG_SEED: u64 = 0x5EED_2026;
pub const DEFAULT_VALUE_RANGE: RangeInclusive<i64> = -10_000_000..=10_000_000;
const FEW_UNIQUE_KEYS: i64 = 16;

pub fn apply_small_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(SMALL_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(SMALL_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(SMALL_RUNTIME_MEASURE_MS));
}

pub fn apply_medium_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(MEDIUM_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(MEDIUM_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(MEDIUM_RUNTIME_MEASURE_MS));
}

pub fn apply_large_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(LARGE_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(LARGE_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(LARGE_RUNTIME_MEASURE_MS));
}

/// Picks one of the presets above by input size.
pub fn apply_runtime_for_size<M: Measurement>(group: &mut BenchmarkGroup<'_, M>, size: usize) {
    if size <= 16_384 {
        apply_small_runtime_config(group);
    } else if size <= 131_072 {
        apply_medium_runtime_config(group);
    } else {
        apply_large_runtime_config(group);
    }
}

pub fn default_rng() -> StdRng {
    StdRng::seed_from_u64(RNG_SEED)
}

/// Shape of a generated input array.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    Random,
    Ascending,
    Descending,
    FewUnique,
}

pub const ALL_PATTERNS: [Pattern; 4] = [
    Pattern::Random,
    Pattern::Ascending,
    Pattern::Descending,
    Pattern::FewUnique,
];

impl Pattern {
    pub fn label(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Ascending => "ascending",
            Self::Descending => "descending",
            Self::FewUnique => "few_unique",
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown pattern `{0}` (expected random, ascending, descending or few_unique)")]
pub struct UnknownPattern(pub String);

impl FromStr for Pattern {
    type Err = UnknownPattern;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase().replace('-', "_");
        ALL_PATTERNS
            .iter()
            .copied()
            .find(|p| p.label() == name)
            .ok_or_else(|| UnknownPattern(s.to_owned()))
    }
}

/// Builds `len` integers drawn from `range` in the requested shape.
///
/// Ascending and descending runs are spread evenly across the range. They are
/// strictly monotonic when the range holds at least `len` values.
pub fn generate<R: Rng + ?Sized>(
    pattern: Pattern,
    len: usize,
    range: RangeInclusive<i64>,
    rng: &mut R,
) -> Vec<i64> {
    let (lo, hi) = (*range.start(), *range.end());
    debug_assert!(lo <= hi);

    match pattern {
        Pattern::Random => (0..len).map(|_| rng.random_range(lo..=hi)).collect(),
        Pattern::Ascending => monotonic(len, lo, hi),
        Pattern::Descending => {
            let mut data = monotonic(len, lo, hi);
            data.reverse();
            data
        }
        Pattern::FewUnique => {
            let keys: Vec<i64> = if hi as i128 - lo as i128 + 1 <= FEW_UNIQUE_KEYS as i128 {
                (lo..=hi).collect()
            } else {
                (0..FEW_UNIQUE_KEYS)
                    .map(|_| rng.random_range(lo..=hi))
                    .collect()
            };
            (0..len).map(|_| keys[rng.random_range(0..keys.len())]).collect()
        }
    }
}

fn monotonic(len: usize, lo: i64, hi: i64) -> Vec<i64> {
    let span = hi as i128 - lo as i128;
    if len <= 1 || span == 0 {
        return vec![lo; len];
    }
    let step = (span / (len as i128 - 1)).max(1);
    (0..len)
        .map(|i| (lo as i128 + (i as i128 * step).min(span)) as i64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_names_round_trip() {
        for p in ALL_PATTERNS {
            assert_eq!(p.label().parse::<Pattern>(), Ok(p));
        }
        assert_eq!("Few-Unique".parse::<Pattern>(), Ok(Pattern::FewUnique));
        assert!("zigzag".parse::<Pattern>().is_err());
    }

    #[test]
    fn random_respects_range() {
        let mut rng = default_rng();
        let data = generate(Pattern::Random, 10_000, -5..=5, &mut rng);
        assert_eq!(data.len(), 10_000);
        assert!(data.iter().all(|x| (-5..=5).contains(x)));
    }

    #[test]
    fn monotonic_patterns() {
        let mut rng = default_rng();
        let up = generate(Pattern::Ascending, 1_000, DEFAULT_VALUE_RANGE, &mut rng);
        assert!(up.windows(2).all(|w| w[0] < w[1]));
        assert!(up.iter().all(|x| DEFAULT_VALUE_RANGE.contains(x)));

        let down = generate(Pattern::Descending, 1_000, DEFAULT_VALUE_RANGE, &mut rng);
        assert!(down.windows(2).all(|w| w[0] > w[1]));

        let narrow = generate(Pattern::Ascending, 50, 0..=3, &mut rng);
        assert!(narrow.windows(2).all(|w| w[0] <= w[1]));
        assert!(narrow.iter().all(|x| (0..=3).contains(x)));

        assert!(generate(Pattern::Descending, 0, 0..=3, &mut rng).is_empty());
        assert_eq!(generate(Pattern::Ascending, 1, 4..=9, &mut rng), vec![4]);
    }

    #[test]
    fn few_unique_has_few_keys() {
        let mut rng = default_rng();
        let mut data = generate(Pattern::FewUnique, 4_096, DEFAULT_VALUE_RANGE, &mut rng);
        data.sort_unstable();
        data.dedup();
        assert!(data.len() <= FEW_UNIQUE_KEYS as usize);

        let tiny = generate(Pattern::FewUnique, 64, 2..=2, &mut rng);
        assert!(tiny.iter().all(|&x| x == 2));
    }

    #[test]
    fn same_seed_same_data() {
        let a = generate(Pattern::Random, 256, DEFAULT_VALUE_RANGE, &mut default_rng());
        let b = generate(Pattern::Random, 256, DEFAULT_VALUE_RANGE, &mut default_rng());
        assert_eq!(a, b);
    }
}
