use std::time::Instant;

use anyhow::Result;
use quicksort::{SortContext, SortVariant, sort_variant, variant_name};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::config::Config;

/// Timings of one variant on one array size.
#[derive(Clone, Debug, Serialize)]
pub struct Measurement {
    #[serde(serialize_with = "variant_by_name")]
    pub variant: SortVariant,
    pub size: usize,
    pub avg_secs: f64,
    pub runs_secs: Vec<f64>,
}

fn variant_by_name<S: serde::Serializer>(
    variant: &SortVariant,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(variant_name(*variant))
}

/// Measures every configured variant on every configured size.
///
/// Each size gets one generated base array; every run sorts a fresh copy of
/// it, so all variants see identical input.
pub fn run(config: &Config) -> Result<Vec<Measurement>> {
    let mut results = Vec::with_capacity(config.sizes.len() * config.variants.len());

    for &size in &config.sizes {
        log::info!("generating {} array of size {size}", config.pattern);
        let mut data_rng = StdRng::seed_from_u64(mix_seed(config.seed ^ size as u64));
        let base = bench::generate(config.pattern, size, config.min..=config.max, &mut data_rng);

        let expected = config.verify.then(|| {
            let mut sorted = base.clone();
            sorted.sort_unstable();
            sorted
        });

        for &variant in &config.variants {
            let measurement = measure(config, variant, &base, expected.as_deref())?;
            log::info!(
                "{} size={} avg={:.4}s over {} runs",
                variant_name(variant),
                size,
                measurement.avg_secs,
                config.runs,
            );
            results.push(measurement);
        }
    }

    Ok(results)
}

fn measure(
    config: &Config,
    variant: SortVariant,
    base: &[i64],
    expected: Option<&[i64]>,
) -> Result<Measurement> {
    let mut ctx = SortContext::with_seed(mix_seed(config.seed ^ ((variant as u64) << 32)));
    let mut runs_secs = Vec::with_capacity(config.runs);

    for run in 0..config.runs {
        let mut data = base.to_vec();
        let start = Instant::now();
        sort_variant(variant, &mut data, &mut ctx);
        let elapsed = start.elapsed().as_secs_f64();
        log::debug!(
            "{} size={} run={} took {:.6}s",
            variant_name(variant),
            base.len(),
            run,
            elapsed
        );

        if let Some(expected) = expected {
            verify(variant, &data, expected)?;
        }
        runs_secs.push(elapsed);
    }

    let avg_secs = runs_secs.iter().sum::<f64>() / runs_secs.len() as f64;
    Ok(Measurement {
        variant,
        size: base.len(),
        avg_secs,
        runs_secs,
    })
}

/// `expected` is the input sorted by std; equality means the output is both
/// ordered and a permutation of the input.
fn verify(variant: SortVariant, actual: &[i64], expected: &[i64]) -> Result<()> {
    if actual.len() != expected.len() {
        log::error!(
            "{} changed the length from {} to {}",
            variant_name(variant),
            expected.len(),
            actual.len()
        );
        anyhow::bail!("{} lost or gained elements", variant_name(variant));
    }

    if let Some(i) = actual.iter().zip(expected).position(|(a, e)| a != e) {
        log::error!(
            "{} diverges at index {i}: got {}, expected {}",
            variant_name(variant),
            actual[i],
            expected[i]
        );
        anyhow::bail!("{} produced an incorrect result", variant_name(variant));
    }

    Ok(())
}

#[inline]
fn mix_seed(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use bench::Pattern;
    use quicksort::ALL_VARIANTS;

    use super::*;

    fn small_config() -> Config {
        Config {
            sizes: vec![0, 1, 257, 2_000],
            runs: 2,
            pattern: Pattern::Random,
            ..Config::default()
        }
    }

    #[test]
    fn measures_every_variant_and_size() {
        let config = small_config();
        let results = run(&config).unwrap();

        assert_eq!(results.len(), config.sizes.len() * ALL_VARIANTS.len());
        for (i, m) in results.iter().enumerate() {
            assert_eq!(m.size, config.sizes[i / ALL_VARIANTS.len()]);
            assert_eq!(m.variant, ALL_VARIANTS[i % ALL_VARIANTS.len()]);
            assert_eq!(m.runs_secs.len(), config.runs);
            assert!(m.avg_secs >= 0.0);
        }
    }

    #[test]
    fn handles_adversarial_patterns() {
        for pattern in [Pattern::Ascending, Pattern::Descending, Pattern::FewUnique] {
            let config = Config {
                sizes: vec![3_000],
                runs: 1,
                pattern,
                ..Config::default()
            };
            assert!(run(&config).is_ok(), "pattern={pattern}");
        }
    }

    #[test]
    fn verify_catches_bad_output() {
        let expected = [1, 2, 3];
        assert!(verify(SortVariant::RandomizedInPlace, &[1, 2, 3], &expected).is_ok());
        assert!(verify(SortVariant::RandomizedInPlace, &[1, 3, 2], &expected).is_err());
        assert!(verify(SortVariant::DeterministicFunctional, &[1, 2], &expected).is_err());
    }

    #[test]
    fn measurement_serializes_variant_by_name() {
        let m = Measurement {
            variant: SortVariant::DeterministicInPlace,
            size: 4,
            avg_secs: 0.5,
            runs_secs: vec![0.25, 0.75],
        };
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["variant"], "deterministic_in_place");
        assert_eq!(json["size"], 4);
    }
}
