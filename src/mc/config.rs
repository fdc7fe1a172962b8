// src/mc/config.rs
//! Simulation specifications for the three priced products.
//!
//! Each spec is an immutable parameter set validated in full before any path
//! is generated. Option kind and product are fixed once here as tagged
//! variants, so the per-path hot loop never re-dispatches on strings or
//! re-checks configuration.

use crate::error::{validation::*, PricerResult};
use crate::rng::SequenceMode;
use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct GreeksConfig: u32 {
        const NONE  = 0;
        const DELTA = 1 << 0;
    }
}

/// Call/put tag, dispatched once at spec construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Call,
    Put,
}

/// Paths per pricing call unless the caller overrides it
pub const DEFAULT_PATHS: usize = 10_000;

/// Arithmetic Asian option priced by pseudo-random Monte Carlo with an
/// optional geometric-average control variate.
#[derive(Debug, Clone)]
pub struct AsianSpec {
    pub s0: f64,
    pub k: f64,
    pub r: f64,
    pub q: f64,
    pub sigma: f64,
    pub t: f64,
    pub steps: usize,
    pub paths: usize,
    pub kind: OptionKind,
    pub use_control_variate: bool,
    pub seed: u64,
}

impl AsianSpec {
    pub fn validate(&self) -> PricerResult<()> {
        validate_paths(self.paths)?;
        validate_steps(self.steps)?;
        validate_positive("s0", self.s0)?;
        validate_positive("k", self.k)?;
        validate_finite("r", self.r)?;
        validate_finite("q", self.q)?;
        // Zero volatility is a defined degenerate case, not an error
        validate_non_negative("sigma", self.sigma)?;
        validate_finite("sigma", self.sigma)?;
        validate_positive("t", self.t)?;
        Ok(())
    }
}

impl Default for AsianSpec {
    fn default() -> Self {
        AsianSpec {
            s0: 100.0,
            k: 100.0,
            r: 0.05,
            q: 0.0,
            sigma: 0.2,
            t: 1.0,
            steps: 252,
            paths: DEFAULT_PATHS,
            kind: OptionKind::Call,
            use_control_variate: true,
            seed: 42,
        }
    }
}

/// Arithmetic two-asset basket option, terminal draw only (single step),
/// with an optional geometric-basket control variate.
#[derive(Debug, Clone)]
pub struct BasketSpec {
    pub s1: f64,
    pub s2: f64,
    pub k: f64,
    pub r: f64,
    pub q: f64,
    pub sigma1: f64,
    pub sigma2: f64,
    pub rho: f64,
    pub t: f64,
    pub paths: usize,
    pub kind: OptionKind,
    pub use_control_variate: bool,
    pub seed: u64,
}

impl BasketSpec {
    pub fn validate(&self) -> PricerResult<()> {
        validate_paths(self.paths)?;
        validate_positive("s1", self.s1)?;
        validate_positive("s2", self.s2)?;
        validate_positive("k", self.k)?;
        validate_finite("r", self.r)?;
        validate_finite("q", self.q)?;
        validate_non_negative("sigma1", self.sigma1)?;
        validate_non_negative("sigma2", self.sigma2)?;
        validate_finite("sigma1", self.sigma1)?;
        validate_finite("sigma2", self.sigma2)?;
        validate_correlation("rho", self.rho)?;
        validate_positive("t", self.t)?;
        Ok(())
    }
}

impl Default for BasketSpec {
    fn default() -> Self {
        BasketSpec {
            s1: 100.0,
            s2: 100.0,
            k: 100.0,
            r: 0.05,
            q: 0.0,
            sigma1: 0.3,
            sigma2: 0.3,
            rho: 0.5,
            t: 3.0,
            paths: DEFAULT_PATHS,
            kind: OptionKind::Call,
            use_control_variate: true,
            seed: 42,
        }
    }
}

/// KIKO (knock-in knock-out) put with cash rebate, priced by scrambled
/// quasi-Monte Carlo by default.
#[derive(Debug, Clone)]
pub struct KikoSpec {
    pub s0: f64,
    pub k: f64,
    pub r: f64,
    pub q: f64,
    pub sigma: f64,
    pub t: f64,
    pub lower: f64,
    pub upper: f64,
    pub rebate: f64,
    pub steps: usize,
    pub paths: usize,
    pub mode: SequenceMode,
    pub greeks: GreeksConfig,
    pub seed: u64,
}

impl KikoSpec {
    pub fn validate(&self) -> PricerResult<()> {
        validate_paths(self.paths)?;
        validate_steps(self.steps)?;
        validate_positive("s0", self.s0)?;
        validate_positive("k", self.k)?;
        validate_finite("r", self.r)?;
        validate_finite("q", self.q)?;
        validate_non_negative("sigma", self.sigma)?;
        validate_finite("sigma", self.sigma)?;
        validate_positive("t", self.t)?;
        validate_barriers(self.lower, self.upper)?;
        validate_non_negative("rebate", self.rebate)?;
        Ok(())
    }
}

impl Default for KikoSpec {
    fn default() -> Self {
        KikoSpec {
            s0: 100.0,
            k: 100.0,
            r: 0.05,
            q: 0.0,
            sigma: 0.2,
            t: 1.0,
            lower: 90.0,
            upper: 110.0,
            rebate: 1.0,
            steps: 252,
            paths: DEFAULT_PATHS,
            mode: SequenceMode::Quasi,
            greeks: GreeksConfig::NONE,
            seed: 42,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(AsianSpec::default().validate().is_ok());
        assert!(BasketSpec::default().validate().is_ok());
        assert!(KikoSpec::default().validate().is_ok());
    }

    #[test]
    fn test_zero_volatility_is_accepted() {
        let spec = AsianSpec {
            sigma: 0.0,
            ..Default::default()
        };
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_barriers() {
        let spec = KikoSpec {
            lower: 110.0,
            upper: 90.0,
            ..Default::default()
        };
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_rebate() {
        let spec = KikoSpec {
            rebate: -1.0,
            ..Default::default()
        };
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_rejects_out_of_range_correlation() {
        let spec = BasketSpec {
            rho: 1.5,
            ..Default::default()
        };
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_paths_and_steps() {
        let spec = AsianSpec {
            paths: 0,
            ..Default::default()
        };
        assert!(spec.validate().is_err());

        let spec = AsianSpec {
            steps: 0,
            ..Default::default()
        };
        assert!(spec.validate().is_err());
    }
}
