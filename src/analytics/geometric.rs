// src/analytics/geometric.rs
//! Closed-form prices for geometric-average options.
//!
//! Under GBM a geometric average of lognormals is itself lognormal, so both
//! the geometric Asian and the geometric basket have Black-Scholes-style
//! closed forms. The Monte Carlo engine uses them as control-variate
//! anchors; the averaging conventions (observations at iT/n for i = 1..n,
//! t=0 excluded; two-asset geometric mean at expiry) match the simulated
//! geometric payoffs in `mc::payoffs` exactly.

use crate::math_utils::norm_cdf;
use crate::mc::config::OptionKind;

fn lognormal_average_price(
    a0: f64,
    k: f64,
    r: f64,
    mu: f64,
    sigma: f64,
    t: f64,
    kind: OptionKind,
) -> f64 {
    let sigma_sqrt_t = sigma * t.sqrt();
    let d1 = ((a0 / k).ln() + (mu + 0.5 * sigma * sigma) * t) / sigma_sqrt_t;
    let d2 = d1 - sigma_sqrt_t;
    let discount = (-r * t).exp();
    let forward = a0 * (mu * t).exp();

    match kind {
        OptionKind::Call => discount * (forward * norm_cdf(d1) - k * norm_cdf(d2)),
        OptionKind::Put => discount * (k * norm_cdf(-d2) - forward * norm_cdf(-d1)),
    }
}

/// Geometric Asian option with `n` equally spaced observations.
///
/// Effective volatility and drift of the geometric average:
/// ```text
/// σ̂ = σ √((n+1)(2n+1) / (6n²))
/// μ̂ = (r - q - σ²/2)(n+1)/(2n) + σ̂²/2
/// ```
/// With n = 1 the average is the terminal price and the result collapses to
/// the plain Black-Scholes price.
pub fn geometric_asian_price(
    s0: f64,
    k: f64,
    r: f64,
    q: f64,
    sigma: f64,
    t: f64,
    n: usize,
    kind: OptionKind,
) -> f64 {
    let n = n as f64;
    let sigma_hat = sigma * ((n + 1.0) * (2.0 * n + 1.0) / (6.0 * n * n)).sqrt();
    let mu_hat =
        (r - q - 0.5 * sigma * sigma) * (n + 1.0) / (2.0 * n) + 0.5 * sigma_hat * sigma_hat;

    lognormal_average_price(s0, k, r, mu_hat, sigma_hat, t, kind)
}

/// Geometric basket option on two assets, geometric mean at expiry.
///
/// ```text
/// B₀ = √(S₁S₂)
/// σ_B = √(σ₁² + 2ρσ₁σ₂ + σ₂²) / 2
/// μ_B = r - q - (σ₁² + σ₂²)/4 + σ_B²/2
/// ```
pub fn geometric_basket_price(
    s1: f64,
    s2: f64,
    k: f64,
    r: f64,
    q: f64,
    sigma1: f64,
    sigma2: f64,
    rho: f64,
    t: f64,
    kind: OptionKind,
) -> f64 {
    let b0 = (s1 * s2).sqrt();
    let sigma_b =
        (sigma1 * sigma1 + 2.0 * rho * sigma1 * sigma2 + sigma2 * sigma2).sqrt() / 2.0;
    let mu_b = r - q - 0.25 * (sigma1 * sigma1 + sigma2 * sigma2) + 0.5 * sigma_b * sigma_b;

    lognormal_average_price(b0, k, r, mu_b, sigma_b, t, kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::bs_analytic;

    #[test]
    fn test_single_observation_asian_equals_european() {
        // With one observation the geometric average is S_T itself
        let geo = geometric_asian_price(100.0, 100.0, 0.05, 0.0, 0.2, 1.0, 1, OptionKind::Call);
        let bs = bs_analytic::bs_call_price(100.0, 100.0, 0.05, 0.0, 0.2, 1.0);
        assert!((geo - bs).abs() < 1e-10, "geo={} bs={}", geo, bs);

        let geo_put =
            geometric_asian_price(100.0, 100.0, 0.05, 0.0, 0.2, 1.0, 1, OptionKind::Put);
        let bs_put = bs_analytic::bs_put_price(100.0, 100.0, 0.05, 0.0, 0.2, 1.0);
        assert!((geo_put - bs_put).abs() < 1e-10);
    }

    #[test]
    fn test_averaging_cheapens_the_call() {
        // More observations mean lower effective volatility and drift
        let few = geometric_asian_price(100.0, 100.0, 0.05, 0.0, 0.3, 3.0, 2, OptionKind::Call);
        let many =
            geometric_asian_price(100.0, 100.0, 0.05, 0.0, 0.3, 3.0, 252, OptionKind::Call);
        let european = bs_analytic::bs_call_price(100.0, 100.0, 0.05, 0.0, 0.3, 3.0);
        assert!(many < few);
        assert!(few < european);
    }

    #[test]
    fn test_degenerate_basket_equals_european() {
        // Identical assets with perfect correlation behave as one asset
        let basket = geometric_basket_price(
            100.0,
            100.0,
            100.0,
            0.05,
            0.0,
            0.3,
            0.3,
            1.0,
            3.0,
            OptionKind::Call,
        );
        let bs = bs_analytic::bs_call_price(100.0, 100.0, 0.05, 0.0, 0.3, 3.0);
        assert!((basket - bs).abs() < 1e-10, "basket={} bs={}", basket, bs);
    }

    #[test]
    fn test_lower_correlation_cheapens_basket_call() {
        let correlated = geometric_basket_price(
            100.0, 100.0, 100.0, 0.05, 0.0, 0.3, 0.3, 0.9, 3.0, OptionKind::Call,
        );
        let diversified = geometric_basket_price(
            100.0, 100.0, 100.0, 0.05, 0.0, 0.3, 0.3, 0.1, 3.0, OptionKind::Call,
        );
        assert!(diversified < correlated);
    }

    #[test]
    fn test_prices_are_positive() {
        let asian =
            geometric_asian_price(100.0, 100.0, 0.05, 0.0, 0.3, 3.0, 50, OptionKind::Put);
        assert!(asian > 0.0);

        let basket = geometric_basket_price(
            100.0, 100.0, 100.0, 0.05, 0.0, 0.3, 0.3, 0.5, 3.0, OptionKind::Put,
        );
        assert!(basket > 0.0);
    }
}
