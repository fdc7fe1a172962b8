// src/rng/mod.rs
//! Deterministic Sequence Sources for Monte Carlo Simulations
//!
//! # Design Philosophy
//!
//! Monte Carlo pricing needs random numbers with specific properties:
//! 1. **Reproducibility**: Same seed → same results (critical for debugging/validation)
//! 2. **Parallel safety**: Different workers must draw from independent streams
//! 3. **Deterministic partitioning**: The stream for path `i` depends only on
//!    `(seed, i)`, never on which worker processes it
//!
//! Two variants are provided, selected by [`SequenceMode`]:
//! - **Pseudo-random**: a per-path `StdRng` seeded from the base seed plus the
//!   path index, used for arithmetic Asian/basket pricing
//! - **Quasi-random**: a digitally scrambled Sobol-type sequence addressed by
//!   path index (see [`sobol`]), mapped to standard normals via the inverse
//!   cumulative normal transform, used for barrier pricing
//!
//! Global generator state is deliberately absent: every pricing call owns its
//! source instance, so concurrent pricing calls never share a stream.

pub mod sobol;

use crate::error::PricerResult;
use crate::math_utils::inv_norm_cdf;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};
use sobol::{SobolSequence, SOBOL_CAPACITY};

/// How the unit-hypercube points behind each path are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceMode {
    /// Independent pseudo-random draws per path
    Pseudo,
    /// Scrambled Sobol-type low-discrepancy points
    Quasi,
}

/// RNG factory for reproducible parallel simulations
///
/// Hands out one independent `StdRng` per path index. Streams for distinct
/// indices are statistically independent; the same `(base_seed, path)` pair
/// always yields the same stream.
#[derive(Debug, Clone)]
pub struct RngFactory {
    base_seed: u64,
}

impl RngFactory {
    pub fn new(base_seed: u64) -> Self {
        Self { base_seed }
    }

    /// Create the RNG owned by a specific path
    pub fn create_path_rng(&self, path_id: u64) -> StdRng {
        StdRng::seed_from_u64(self.base_seed.wrapping_add(path_id))
    }
}

pub fn get_normal_draw<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    StandardNormal.sample(rng)
}

/// A source of standard-normal rows, one row per path.
///
/// The row for path `i` is a deterministic function of `(seed, i)` in both
/// variants, which is what makes batch partitioning across rayon workers
/// reproducible regardless of scheduling.
pub enum NormalSource {
    Pseudo { factory: RngFactory, dimension: usize },
    Quasi { sequence: SobolSequence },
}

impl NormalSource {
    /// Build a source for `samples` paths of `dimension` normals each.
    ///
    /// Fails with a configuration error when the quasi-random generator does
    /// not support the requested dimension, or when `samples` exceeds the
    /// sequence capacity.
    pub fn new(
        mode: SequenceMode,
        dimension: usize,
        samples: u64,
        seed: u64,
    ) -> PricerResult<Self> {
        match mode {
            SequenceMode::Pseudo => Ok(NormalSource::Pseudo {
                factory: RngFactory::new(seed),
                dimension,
            }),
            SequenceMode::Quasi => {
                let sequence = SobolSequence::new(dimension, seed)?;
                if samples > SOBOL_CAPACITY {
                    return Err(crate::error::PricerError::SequenceExhausted {
                        index: samples,
                        capacity: SOBOL_CAPACITY,
                    });
                }
                Ok(NormalSource::Quasi { sequence })
            }
        }
    }

    pub fn dimension(&self) -> usize {
        match self {
            NormalSource::Pseudo { dimension, .. } => *dimension,
            NormalSource::Quasi { sequence } => sequence.dimensions(),
        }
    }

    /// Fill `out` with the standard-normal row for `path_id`.
    ///
    /// `out.len()` must equal `self.dimension()`. Capacity was checked at
    /// construction, so the quasi variant cannot run past the sequence end
    /// for in-range path ids.
    pub fn fill_normals(&self, path_id: u64, out: &mut [f64]) -> PricerResult<()> {
        match self {
            NormalSource::Pseudo { factory, .. } => {
                let mut rng = factory.create_path_rng(path_id);
                for z in out.iter_mut() {
                    *z = get_normal_draw(&mut rng);
                }
                Ok(())
            }
            NormalSource::Quasi { sequence } => {
                // Index 0 is the reserved origin point; path ids start there + 1.
                sequence.point_at(path_id + 1, out)?;
                for u in out.iter_mut() {
                    *u = inv_norm_cdf(*u);
                }
                Ok(())
            }
        }
    }
}
