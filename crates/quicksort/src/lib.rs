use std::fmt;
use std::str::FromStr;

use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

pub mod functional;
pub mod in_place;
pub mod partition;
pub mod pivot;

pub use pivot::{FirstPivot, Pivot, PivotPolicy, RandomPivot};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PivotMode {
    Deterministic,
    Randomized,
}

impl PivotMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Deterministic => "deterministic",
            Self::Randomized => "randomized",
        }
    }
}

impl fmt::Display for PivotMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PivotMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deterministic" | "det" => Ok(Self::Deterministic),
            "randomized" | "random" | "rand" => Ok(Self::Randomized),
            _ => Err(ParseError::UnknownPivotMode(s.to_owned())),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SortVariant {
    DeterministicFunctional,
    RandomizedFunctional,
    DeterministicInPlace,
    RandomizedInPlace,
}

pub const ALL_VARIANTS: [SortVariant; 4] = [
    SortVariant::DeterministicFunctional,
    SortVariant::RandomizedFunctional,
    SortVariant::DeterministicInPlace,
    SortVariant::RandomizedInPlace,
];

pub fn all_variants() -> &'static [SortVariant] {
    &ALL_VARIANTS
}

pub fn variant_name(variant: SortVariant) -> &'static str {
    match variant {
        SortVariant::DeterministicFunctional => "deterministic_functional",
        SortVariant::RandomizedFunctional => "randomized_functional",
        SortVariant::DeterministicInPlace => "deterministic_in_place",
        SortVariant::RandomizedInPlace => "randomized_in_place",
    }
}

impl SortVariant {
    pub fn pivot_mode(self) -> PivotMode {
        match self {
            Self::DeterministicFunctional | Self::DeterministicInPlace => PivotMode::Deterministic,
            Self::RandomizedFunctional | Self::RandomizedInPlace => PivotMode::Randomized,
        }
    }

    pub fn is_in_place(self) -> bool {
        matches!(self, Self::DeterministicInPlace | Self::RandomizedInPlace)
    }
}

impl fmt::Display for SortVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(variant_name(*self))
    }
}

impl FromStr for SortVariant {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase().replace('-', "_");
        all_variants()
            .iter()
            .copied()
            .find(|&v| variant_name(v) == name)
            .ok_or_else(|| ParseError::UnknownVariant(s.to_owned()))
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown pivot mode `{0}` (expected `deterministic` or `randomized`)")]
    UnknownPivotMode(String),
    #[error("unknown sort variant `{0}`")]
    UnknownVariant(String),
}

/// Pseudo-random source for the randomized pivot. Nothing else draws from it.
#[derive(Clone, Debug)]
pub struct SortContext {
    pub rng: StdRng,
}

impl Default for SortContext {
    fn default() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl SortContext {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[inline]
    pub(crate) fn pivot(&mut self, mode: PivotMode) -> Pivot<'_, StdRng> {
        Pivot::new(mode, &mut self.rng)
    }
}

/// Returns a sorted copy of `input`; `input` itself is not modified.
///
/// Only the randomized mode seeds a generator from OS entropy.
pub fn functional_sort<T: Ord + Clone>(input: &[T], mode: PivotMode) -> Vec<T> {
    match mode {
        PivotMode::Deterministic => functional::quick_sort(input, &mut FirstPivot),
        PivotMode::Randomized => functional_sort_with_ctx(input, mode, &mut SortContext::default()),
    }
}

pub fn functional_sort_with_ctx<T: Ord + Clone>(
    input: &[T],
    mode: PivotMode,
    ctx: &mut SortContext,
) -> Vec<T> {
    functional::quick_sort(input, &mut ctx.pivot(mode))
}

/// Sorts `data` ascending in place.
pub fn in_place_sort<T: Ord>(data: &mut [T], mode: PivotMode) {
    match mode {
        PivotMode::Deterministic => in_place::quick_sort(data, &mut FirstPivot),
        PivotMode::Randomized => in_place_sort_with_ctx(data, mode, &mut SortContext::default()),
    }
}

pub fn in_place_sort_with_ctx<T: Ord>(data: &mut [T], mode: PivotMode, ctx: &mut SortContext) {
    in_place::quick_sort(data, &mut ctx.pivot(mode));
}

/// Runs `variant` and leaves the sorted sequence in `data`.
///
/// Functional variants build a fresh vector from a borrowed view of `data`
/// and then replace its contents.
pub fn sort_variant<T: Ord + Clone>(variant: SortVariant, data: &mut Vec<T>, ctx: &mut SortContext) {
    let mode = variant.pivot_mode();
    if variant.is_in_place() {
        in_place_sort_with_ctx(data, mode, ctx);
    } else {
        *data = functional_sort_with_ctx(data, mode, ctx);
    }
}
