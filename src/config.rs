//! Configuration for the sub-architecture pipeline.
//!
//! Two knobs change results, one only changes scheduling:
//! - wl_iterations: refinement rounds of the canonical hash used to bucket
//!   candidates by isomorphism class.
//! - collision_check: whether a hash hit is trusted (`HashOnly`) or confirmed
//!   with an exact isomorphism test (`Exact`).
//! - parallel: whether induced subgraphs and the pairwise embedding scan run
//!   on the rayon thread pool.
//!
//! ```
//! use optimal_subarchitectures::{CollisionCheck, Config};
//! let cfg = Config::default()
//!     .with_collision_check(CollisionCheck::HashOnly)
//!     .with_parallel(false);
//! assert_eq!(cfg.wl_iterations, 8);
//! ```

/// Refinement rounds used when none are configured.
pub const DEFAULT_WL_ITERATIONS: usize = 8;

/// Global pipeline configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Rounds of Weisfeiler-Lehman color refinement in the canonical hash.
    pub wl_iterations: usize,
    /// How candidates sharing a canonical hash are treated.
    pub collision_check: CollisionCheck,
    /// Run data-parallel stages on the rayon pool.
    pub parallel: bool,
}

impl Config {
    pub fn new(wl_iterations: usize, collision_check: CollisionCheck, parallel: bool) -> Self {
        Self {
            wl_iterations,
            collision_check,
            parallel,
        }
    }

    pub fn with_wl_iterations(mut self, wl_iterations: usize) -> Self {
        self.wl_iterations = wl_iterations;
        self
    }

    pub fn with_collision_check(mut self, collision_check: CollisionCheck) -> Self {
        self.collision_check = collision_check;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

impl Default for Config {
    /// Eight refinement rounds, exact collision checks, parallel stages.
    fn default() -> Self {
        Self::new(DEFAULT_WL_ITERATIONS, CollisionCheck::Exact, true)
    }
}

/// Treatment of two candidates whose canonical hashes agree.
///
/// - HashOnly:
///     The later candidate is discarded. Non-isomorphic graphs that collide
///     (for example two regular graphs of equal degree and order) are merged.
/// - Exact:
///     The later candidate is discarded only if it is isomorphic to a kept
///     member of the same hash class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum CollisionCheck {
    /// Trust the canonical hash.
    HashOnly,
    /// Confirm hash hits with an exact isomorphism test.
    #[default]
    Exact,
}
