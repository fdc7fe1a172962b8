// src/rng/sobol.rs
//! Scrambled Sobol-type low-discrepancy sequence
//!
//! # Design
//!
//! Direction numbers for the first dimension are the canonical Sobol ones;
//! higher dimensions use seed-derived direction numbers with the leading bit
//! forced, which keeps the digital-net structure while breaking the
//! deterministic cross-dimension correlation of unscrambled tables. On top of
//! that, every dimension applies a random digital (XOR) scramble drawn from
//! the seed, so replications with different seeds give independent
//! randomized estimates.
//!
//! # Indexed access
//!
//! Points are addressable by absolute index through the Gray-code identity
//!
//! ```text
//! x_i = XOR over set bits j of gray(i) of v_j,   gray(i) = i ^ (i >> 1)
//! ```
//!
//! which needs no mutable generator state. Workers can therefore pull
//! disjoint path-index ranges in parallel and the result is independent of
//! how the work is scheduled.

use crate::error::{PricerError, PricerResult};

const INV_U64_RANGE: f64 = 1.0 / 18_446_744_073_709_551_616.0;
const HALF_INV_U64: f64 = 0.5 * INV_U64_RANGE;
pub const SOBOL_MAX_DIMENSIONS: usize = 21_201;

/// Points 1..=2^64-1 are addressable; index 0 is reserved as the skipped
/// origin point of the unscrambled sequence.
pub const SOBOL_CAPACITY: u64 = u64::MAX - 1;

#[derive(Debug, Clone)]
pub struct SobolSequence {
    dimensions: usize,
    directions: Vec<[u64; 64]>,
    scramblers: Vec<u64>,
}

impl SobolSequence {
    pub fn new(dimensions: usize, seed: u64) -> PricerResult<Self> {
        if !(1..=SOBOL_MAX_DIMENSIONS).contains(&dimensions) {
            return Err(PricerError::InvalidConfiguration {
                field: "dimensions".to_string(),
                reason: format!(
                    "Sobol dimensions must be in [1, {}], got {}",
                    SOBOL_MAX_DIMENSIONS, dimensions
                ),
            });
        }

        let mut directions = Vec::with_capacity(dimensions);
        let mut scramblers = Vec::with_capacity(dimensions);

        for dim in 0..dimensions {
            directions.push(build_direction_numbers(dim as u64, seed));
            scramblers.push(splitmix64(seed ^ ((dim as u64 + 1) << 32)));
        }

        Ok(Self {
            dimensions,
            directions,
            scramblers,
        })
    }

    #[inline]
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Writes the scrambled point with absolute index `index` (1-based) into
    /// `out`. Stateless, so safe to call concurrently from disjoint workers.
    pub fn point_at(&self, index: u64, out: &mut [f64]) -> PricerResult<()> {
        if index == 0 || index == u64::MAX {
            return Err(PricerError::SequenceExhausted {
                index,
                capacity: SOBOL_CAPACITY,
            });
        }

        let mut gray = index ^ (index >> 1);
        let mut x = vec![0_u64; self.dimensions];
        while gray != 0 {
            let j = gray.trailing_zeros() as usize;
            for dim in 0..self.dimensions {
                x[dim] ^= self.directions[dim][j];
            }
            gray &= gray - 1;
        }

        for dim in 0..self.dimensions {
            let scrambled = x[dim] ^ self.scramblers[dim];
            out[dim] = (scrambled as f64).mul_add(INV_U64_RANGE, HALF_INV_U64);
        }

        Ok(())
    }
}

#[inline]
fn build_direction_numbers(dim: u64, seed: u64) -> [u64; 64] {
    // Dimension 1 uses canonical Sobol direction numbers.
    if dim == 0 {
        let mut v = [0_u64; 64];
        for (j, item) in v.iter_mut().enumerate() {
            *item = 1_u64 << (63 - j);
        }
        return v;
    }

    let mut v = [0_u64; 64];
    for (j, item) in v.iter_mut().enumerate() {
        let hash = splitmix64(seed ^ ((dim + 1) << 40) ^ j as u64);
        let mask = if j == 63 {
            u64::MAX
        } else {
            (1_u64 << (j + 1)) - 1
        };
        let m = (hash | 1) & mask;
        *item = m << (63 - j);
    }
    v
}

#[inline]
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}
