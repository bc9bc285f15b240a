use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bench::{Pattern, RNG_SEED};
use clap::{ArgAction, Args, Parser};
use quicksort::{ALL_VARIANTS, SortVariant};
use serde::{Deserialize, Deserializer};

pub const DEFAULT_SIZES: [usize; 4] = [10_000, 50_000, 100_000, 500_000];
pub const DEFAULT_RUNS: usize = 10;
pub const DEFAULT_MIN: i64 = -10_000_000;
pub const DEFAULT_MAX: i64 = 10_000_000;

#[derive(Debug, Parser)]
#[command(name = "sort_compare")]
#[command(about = "Times deterministic and randomized quicksort, functional and in place")]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,

    /// TOML file whose settings replace the options above
    #[arg(long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Write the measurements as JSON
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Draw average time against array size (`.svg` or `.png`)
    #[arg(long, value_name = "FILE")]
    pub plot: Option<PathBuf>,
}

impl Cli {
    /// The effective, validated configuration.
    pub fn resolve(&self) -> Result<Config> {
        let config = match &self.config_file {
            Some(path) => Config::from_file(path)?,
            None => self.config.clone(),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Benchmark settings
#[derive(Debug, Clone, Deserialize, Args)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Array sizes to measure
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_SIZES)]
    pub sizes: Vec<usize>,

    /// Runs per variant and size; the reported time is their mean
    #[arg(long, default_value_t = DEFAULT_RUNS)]
    pub runs: usize,

    /// Seed for data generation and randomized pivots
    #[arg(long, default_value_t = RNG_SEED)]
    pub seed: u64,

    /// Smallest generated value
    #[arg(long, default_value_t = DEFAULT_MIN, allow_negative_numbers = true)]
    pub min: i64,

    /// Largest generated value
    #[arg(long, default_value_t = DEFAULT_MAX, allow_negative_numbers = true)]
    pub max: i64,

    /// Input shape: random, ascending, descending or few_unique
    #[arg(long, default_value_t = Pattern::Random)]
    pub pattern: Pattern,

    /// Variants to run, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = ALL_VARIANTS)]
    #[serde(deserialize_with = "variant_names")]
    pub variants: Vec<SortVariant>,

    /// Check every output for order and content
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub verify: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            runs: DEFAULT_RUNS,
            seed: RNG_SEED,
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            pattern: Pattern::Random,
            variants: ALL_VARIANTS.to_vec(),
            verify: true,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            anyhow::bail!("at least one array size is required");
        }

        if self.runs == 0 {
            anyhow::bail!("runs must be greater than 0");
        }

        if self.min > self.max {
            anyhow::bail!("min ({}) must not exceed max ({})", self.min, self.max);
        }

        if self.variants.is_empty() {
            anyhow::bail!("at least one sort variant is required");
        }

        Ok(())
    }

    /// Load configuration from a TOML file; missing keys keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }
}

fn variant_names<'de, D>(deserializer: D) -> Result<Vec<SortVariant>, D::Error>
where
    D: Deserializer<'de>,
{
    let names = Vec::<String>::deserialize(deserializer)?;
    names
        .iter()
        .map(|name| name.parse().map_err(serde::de::Error::custom))
        .collect()
}
