//! Deterministic RNG for synthetic roster generation.
//!
//! RULES:
//!   - Only the roster generator draws randomness. The resolver,
//!     state machine and aggregator never do.
//!   - Each generation stage gets its own stream, derived from the
//!     master seed and a stable stage index, so adding draws to one
//!     stage never shifts another.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A deterministic RNG stream for one generation stage.
pub struct ScenarioRng {
    inner: Pcg64Mcg,
}

impl ScenarioRng {
    /// Create a stage RNG from the master seed and its stage slot.
    pub fn new(master_seed: u64, stage: RosterStage) -> Self {
        let derived_seed = master_seed ^ (stage as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15);
        log::trace!("{} stream seeded with {derived_seed:#018x}", stage.name());
        Self { inner: Pcg64Mcg::seed_from_u64(derived_seed) }
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Roll a usize in [lo, hi], inclusive.
    pub fn range_inclusive(&mut self, lo: usize, hi: usize) -> usize {
        assert!(lo <= hi, "empty range {lo}..={hi}");
        let span = (hi - lo).saturating_add(1) as u64;
        lo + self.next_u64_below(span) as usize
    }

    /// Pick one element uniformly.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.next_u64_below(items.len() as u64) as usize]
    }

    /// Draw `k` distinct values from `pool` (partial Fisher–Yates).
    /// Order of the result is the draw order.
    pub fn sample_distinct(&mut self, pool: &mut [usize], k: usize) -> Vec<usize> {
        let k = k.min(pool.len());
        for i in 0..k {
            let j = i + self.next_u64_below((pool.len() - i) as u64) as usize;
            pool.swap(i, j);
        }
        pool[..k].to_vec()
    }
}

/// Stable generation stage slots.
/// NEVER reorder or remove entries — only append.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum RosterStage {
    FacultyNames = 0,
    Specialties  = 1,
    TraineeNames = 2,
    Assignments  = 3,
}

impl RosterStage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FacultyNames => "faculty_names",
            Self::Specialties  => "specialties",
            Self::TraineeNames => "trainee_names",
            Self::Assignments  => "assignments",
        }
    }
}
