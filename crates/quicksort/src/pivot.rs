use rand::Rng;

use crate::PivotMode;

/// Chooses the pivot of a subrange.
///
/// `select` receives the length of the current subrange (always at least 2)
/// and returns an offset in `0..len` relative to the subrange start.
pub trait PivotPolicy {
    fn select(&mut self, len: usize) -> usize;
}

/// Always the first element of the subrange.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstPivot;

impl PivotPolicy for FirstPivot {
    #[inline]
    fn select(&mut self, _len: usize) -> usize {
        0
    }
}

/// Uniformly random position in the subrange.
#[derive(Debug)]
pub struct RandomPivot<R> {
    rng: R,
}

impl<R: Rng> RandomPivot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> PivotPolicy for RandomPivot<R> {
    #[inline]
    fn select(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        self.rng.random_range(0..len)
    }
}

/// Runtime dispatch over [`PivotMode`]. The randomized arm borrows the
/// caller's generator so consecutive sorts continue the same stream.
pub enum Pivot<'a, R> {
    First(FirstPivot),
    Random(RandomPivot<&'a mut R>),
}

impl<'a, R: Rng> Pivot<'a, R> {
    pub fn new(mode: PivotMode, rng: &'a mut R) -> Self {
        match mode {
            PivotMode::Deterministic => Self::First(FirstPivot),
            PivotMode::Randomized => Self::Random(RandomPivot::new(rng)),
        }
    }
}

impl<R: Rng> PivotPolicy for Pivot<'_, R> {
    #[inline]
    fn select(&mut self, len: usize) -> usize {
        match self {
            Self::First(p) => p.select(len),
            Self::Random(p) => p.select(len),
        }
    }
}
