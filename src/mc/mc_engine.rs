// src/mc/mc_engine.rs
//! Monte Carlo pricing pipelines.
//!
//! # Math Framework
//!
//! All products simulate GBM with the exact solution per step:
//! ```text
//! S_{t+dt} = S_t * exp((r - q - σ²/2)dt + σ√dt * Z_t)
//! ```
//!
//! # Variance Reduction
//!
//! Arithmetic-average products carry a geometric-average control variate:
//! the geometric payoff Y is computed from the *same* path as the
//! arithmetic payoff X, and the estimator is
//! ```text
//! mean(X) - c * (mean(Y) - E[Y]),    c = Cov(X,Y) / Var(Y)
//! ```
//! with E\[Y\] supplied by the closed-form geometric price. The coefficient
//! is estimated from the sample in the same single pass that accumulates
//! the payoff sums (see `PairedStats`), so no second sweep over the paths
//! is needed.
//!
//! # Parallelism
//!
//! Paths are embarrassingly parallel. The total path count is partitioned
//! into fixed-size batches; rayon workers accumulate one local aggregator
//! per batch, the ordered partials are merged sequentially at the end. The
//! draw for path `i` depends only on `(seed, i)` and batch boundaries do
//! not depend on the thread count, so results are bit reproducible no
//! matter how the batches get scheduled.

use crate::analytics::geometric;
use crate::error::PricerResult;
use crate::mc::barrier::{BarrierMonitor, BarrierState};
use crate::mc::config::{AsianSpec, BasketSpec, GreeksConfig, KikoSpec};
use crate::mc::payoffs::{asian_payoffs, basket_payoffs, kiko_put_payoff};
use crate::mc::stats::{EstimationResult, PairedStats, SampleStats};
use crate::models::gbm::{correlate_pair, Gbm};
use crate::rng::{self, NormalSource, RngFactory, SequenceMode};
use rayon::prelude::*;

/// Paths per worker batch. Fixed so that batch boundaries, and therefore
/// the merge order of partial sums, never depend on scheduling.
const PATHS_PER_BATCH: usize = 1_024;

fn batch_ranges(paths: usize) -> Vec<(usize, usize)> {
    (0..paths)
        .step_by(PATHS_PER_BATCH)
        .map(|start| (start, (start + PATHS_PER_BATCH).min(paths)))
        .collect()
}

/// Price an arithmetic Asian option by pseudo-random Monte Carlo.
///
/// With `use_control_variate` the geometric-average payoff from the same
/// paths anchors the estimate to the closed-form geometric Asian price.
///
/// # Errors
///
/// Returns `PricerError` for invalid parameters or a numerically unstable
/// estimate (non-finite price, significantly negative variance).
pub fn mc_price_asian(spec: &AsianSpec) -> PricerResult<EstimationResult> {
    spec.validate()?;
    let n = spec.paths;
    let dt = spec.t / spec.steps as f64;
    let discount = (-spec.r * spec.t).exp();
    let gbm = Gbm::new(spec.r, spec.q, spec.sigma);
    let factory = RngFactory::new(spec.seed);

    let partials: Vec<PairedStats> = batch_ranges(n)
        .into_par_iter()
        .map(|(start, end)| {
            let mut acc = PairedStats::default();
            let mut normals = vec![0.0; spec.steps];
            let mut path = Vec::with_capacity(spec.steps + 1);

            for i in start..end {
                let mut path_rng = factory.create_path_rng(i as u64);
                for z in normals.iter_mut() {
                    *z = rng::get_normal_draw(&mut path_rng);
                }
                gbm.fill_path(spec.s0, dt, &normals, &mut path);

                // Arithmetic and geometric payoffs share this path draw
                let payoff = asian_payoffs(&path, spec.k, spec.kind);
                acc.record(payoff.arithmetic, payoff.geometric);
            }
            acc
        })
        .collect();

    let stats = partials
        .into_iter()
        .fold(PairedStats::default(), |a, b| a.merge(b));

    // A (numerically) constant control carries no information; fall back to
    // the plain estimator rather than divide by a vanishing variance. This
    // also covers the zero-volatility degenerate case.
    if spec.use_control_variate && stats.control_coefficient() != 0.0 {
        let geo_price = geometric::geometric_asian_price(
            spec.s0, spec.k, spec.r, spec.q, spec.sigma, spec.t, spec.steps, spec.kind,
        );
        let (mean, variance) = stats.controlled_moments(geo_price / discount);
        EstimationResult::from_moments(
            mean,
            variance,
            n,
            discount,
            "arithmetic Asian Monte Carlo with control variate",
        )
    } else {
        let (mean, variance) = stats.plain_moments();
        EstimationResult::from_moments(mean, variance, n, discount, "arithmetic Asian Monte Carlo")
    }
}

/// Price an arithmetic two-asset basket option by pseudo-random Monte Carlo.
///
/// Only the terminal prices matter, so each path is a single exact GBM step
/// over the full maturity. Both assets advance from the same draw column
/// with `Z₂ = ρZ₁ + √(1-ρ²)Z₂'`, making the correlation exact.
pub fn mc_price_basket(spec: &BasketSpec) -> PricerResult<EstimationResult> {
    spec.validate()?;
    let n = spec.paths;
    let discount = (-spec.r * spec.t).exp();
    let gbm1 = Gbm::new(spec.r, spec.q, spec.sigma1);
    let gbm2 = Gbm::new(spec.r, spec.q, spec.sigma2);
    let factory = RngFactory::new(spec.seed);

    let partials: Vec<PairedStats> = batch_ranges(n)
        .into_par_iter()
        .map(|(start, end)| {
            let mut acc = PairedStats::default();
            for i in start..end {
                let mut path_rng = factory.create_path_rng(i as u64);
                let z1 = rng::get_normal_draw(&mut path_rng);
                let z_independent = rng::get_normal_draw(&mut path_rng);
                let (z1, z2) = correlate_pair(z1, z_independent, spec.rho);

                let s1_t = gbm1.exact_step(spec.s1, spec.t, z1);
                let s2_t = gbm2.exact_step(spec.s2, spec.t, z2);

                let payoff = basket_payoffs(s1_t, s2_t, spec.k, spec.kind);
                acc.record(payoff.arithmetic, payoff.geometric);
            }
            acc
        })
        .collect();

    let stats = partials
        .into_iter()
        .fold(PairedStats::default(), |a, b| a.merge(b));

    if spec.use_control_variate && stats.control_coefficient() != 0.0 {
        let geo_price = geometric::geometric_basket_price(
            spec.s1, spec.s2, spec.k, spec.r, spec.q, spec.sigma1, spec.sigma2, spec.rho,
            spec.t, spec.kind,
        );
        let (mean, variance) = stats.controlled_moments(geo_price / discount);
        EstimationResult::from_moments(
            mean,
            variance,
            n,
            discount,
            "arithmetic basket Monte Carlo with control variate",
        )
    } else {
        let (mean, variance) = stats.plain_moments();
        EstimationResult::from_moments(mean, variance, n, discount, "arithmetic basket Monte Carlo")
    }
}

/// Price a KIKO put by (quasi-)Monte Carlo.
///
/// Barrier state is tracked while each path is generated; a knocked-out
/// path stops simulating immediately since its payoff is fixed at the
/// rebate. When `spec.greeks` requests `DELTA`, the full pipeline is re-run
/// twice with bumped spot (see [`mc_delta_kiko_put`]) and the delta is
/// attached to the result.
pub fn mc_price_kiko_put(spec: &KikoSpec) -> PricerResult<EstimationResult> {
    spec.validate()?;
    let source = NormalSource::new(spec.mode, spec.steps, spec.paths as u64, spec.seed)?;
    let mut result = kiko_single_run(spec, &source)?;

    if spec.greeks.contains(GreeksConfig::DELTA) {
        result.delta = Some(mc_delta_kiko_put(spec)?);
    }
    Ok(result)
}

fn kiko_single_run(spec: &KikoSpec, source: &NormalSource) -> PricerResult<EstimationResult> {
    let n = spec.paths;
    let dt = spec.t / spec.steps as f64;
    let discount = (-spec.r * spec.t).exp();
    let gbm = Gbm::new(spec.r, spec.q, spec.sigma);
    let method = match spec.mode {
        SequenceMode::Quasi => "KIKO put quasi-Monte Carlo",
        SequenceMode::Pseudo => "KIKO put Monte Carlo",
    };

    let partials: PricerResult<Vec<SampleStats>> = batch_ranges(n)
        .into_par_iter()
        .map(|(start, end)| {
            let mut acc = SampleStats::default();
            let mut normals = vec![0.0; spec.steps];

            for i in start..end {
                source.fill_normals(i as u64, &mut normals)?;

                let mut monitor = BarrierMonitor::new(spec.lower, spec.upper);
                monitor.observe(spec.s0);

                let mut current_s = spec.s0;
                if !monitor.is_knocked_out() {
                    for &z in &normals {
                        current_s = gbm.exact_step(current_s, dt, z);
                        if monitor.observe(current_s) == BarrierState::KnockedOut {
                            // Terminal state: the payoff is the rebate no
                            // matter what the rest of the path does
                            break;
                        }
                    }
                }

                acc.record(kiko_put_payoff(
                    monitor.state(),
                    current_s,
                    spec.k,
                    spec.rebate,
                ));
            }
            Ok(acc)
        })
        .collect();

    let stats = partials?
        .into_iter()
        .fold(SampleStats::default(), |a, b| a.merge(b));

    EstimationResult::from_moments(stats.mean(), stats.sample_variance(), n, discount, method)
}

/// Delta of the KIKO put by central finite difference.
///
/// Re-runs the full pricing pipeline at S(1 ± 0.01):
/// ```text
/// Δ = (V(S + h) - V(S - h)) / (2h),   h = 0.01 * S
/// ```
/// Both bumped runs keep the caller's seed, so they replay the identical
/// sequence-source points (common random numbers), and they execute
/// concurrently with each other.
pub fn mc_delta_kiko_put(spec: &KikoSpec) -> PricerResult<f64> {
    spec.validate()?;
    let h = 0.01 * spec.s0;

    let mut bumped_up = spec.clone();
    bumped_up.s0 = spec.s0 + h;
    bumped_up.greeks = GreeksConfig::NONE;

    let mut bumped_down = spec.clone();
    bumped_down.s0 = spec.s0 - h;
    bumped_down.greeks = GreeksConfig::NONE;

    let (up, down) = rayon::join(
        || mc_price_kiko_put(&bumped_up),
        || mc_price_kiko_put(&bumped_down),
    );

    Ok((up?.price - down?.price) / (2.0 * h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mc::config::OptionKind;

    #[test]
    fn test_batch_ranges_cover_all_paths() {
        let ranges = batch_ranges(10_000);
        assert_eq!(ranges.first().unwrap().0, 0);
        assert_eq!(ranges.last().unwrap().1, 10_000);
        let total: usize = ranges.iter().map(|(s, e)| e - s).sum();
        assert_eq!(total, 10_000);
        for window in ranges.windows(2) {
            assert_eq!(window[0].1, window[1].0);
        }
    }

    #[test]
    fn test_asian_rejects_invalid_spec() {
        let spec = AsianSpec {
            s0: -100.0,
            ..Default::default()
        };
        assert!(mc_price_asian(&spec).is_err());
    }

    #[test]
    fn test_asian_idempotent_for_fixed_seed() {
        let spec = AsianSpec {
            paths: 2_000,
            steps: 50,
            ..Default::default()
        };
        let a = mc_price_asian(&spec).unwrap();
        let b = mc_price_asian(&spec).unwrap();
        assert_eq!(a.price.to_bits(), b.price.to_bits());
        assert_eq!(a.std_error.to_bits(), b.std_error.to_bits());
    }

    #[test]
    fn test_basket_put_call_both_positive() {
        let call = mc_price_basket(&BasketSpec {
            paths: 5_000,
            kind: OptionKind::Call,
            ..Default::default()
        })
        .unwrap();
        let put = mc_price_basket(&BasketSpec {
            paths: 5_000,
            kind: OptionKind::Put,
            ..Default::default()
        })
        .unwrap();
        assert!(call.price > 0.0);
        assert!(put.price > 0.0);
    }

    #[test]
    fn test_kiko_pseudo_mode_also_runs() {
        let spec = KikoSpec {
            paths: 2_000,
            steps: 50,
            mode: SequenceMode::Pseudo,
            ..Default::default()
        };
        let result = mc_price_kiko_put(&spec).unwrap();
        assert!(result.price > 0.0);
        assert!(result.std_error > 0.0);
    }
}
