//! Deterministic RNG using PCG32.
//!
//! All randomness in the pipeline (dataset shuffles, the corpus train/valid
//! split) flows through an explicitly seeded generator, never an ambient one.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Creates a PCG32 RNG from a 64-bit seed.
pub fn create_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}
