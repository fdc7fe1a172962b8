// src/analytics/bs_analytic.rs
//! Analytical Black-Scholes formulas with a repo rate `q`.
//!
//! # Mathematical Foundation
//!
//! Under the Black-Scholes model with repo rate the underlying follows:
//! ```text
//! dS_t = (r - q) S_t dt + σ S_t dW_t
//! ```
//!
//! The risk-neutral pricing formula gives:
//! ```text
//! V(S,t) = e^(-r(T-t)) * E^Q[payoff(S_T) | S_t = S]
//! ```
//!
//! These closed forms serve as test anchors for the Monte Carlo engine and
//! as the degenerate (single-observation) limit of the geometric-average
//! prices in [`super::geometric`].

use crate::math_utils::norm_cdf;

fn d1_d2(s: f64, k: f64, r: f64, q: f64, sigma: f64, t: f64) -> (f64, f64) {
    let sigma_sqrt_t = sigma * t.sqrt();
    let d1 = ((s / k).ln() + (r - q + 0.5 * sigma * sigma) * t) / sigma_sqrt_t;
    (d1, d1 - sigma_sqrt_t)
}

/// Black-Scholes European call option price
///
/// # Formula
/// ```text
/// C = S*e^(-qT)*Φ(d₁) - K*e^(-rT)*Φ(d₂)
/// d₁ = [ln(S/K) + (r - q + σ²/2)T] / (σ√T),  d₂ = d₁ - σ√T
/// ```
pub fn bs_call_price(s: f64, k: f64, r: f64, q: f64, sigma: f64, t: f64) -> f64 {
    let (d1, d2) = d1_d2(s, k, r, q, sigma, t);
    s * (-q * t).exp() * norm_cdf(d1) - k * (-r * t).exp() * norm_cdf(d2)
}

/// Black-Scholes European put option price
///
/// # Formula
/// ```text
/// P = K*e^(-rT)*Φ(-d₂) - S*e^(-qT)*Φ(-d₁)
/// ```
pub fn bs_put_price(s: f64, k: f64, r: f64, q: f64, sigma: f64, t: f64) -> f64 {
    let (d1, d2) = d1_d2(s, k, r, q, sigma, t);
    k * (-r * t).exp() * norm_cdf(-d2) - s * (-q * t).exp() * norm_cdf(-d1)
}

/// Black-Scholes Delta (∂V/∂S) for a European call: e^(-qT) Φ(d₁)
pub fn bs_call_delta(s: f64, k: f64, r: f64, q: f64, sigma: f64, t: f64) -> f64 {
    let (d1, _) = d1_d2(s, k, r, q, sigma, t);
    (-q * t).exp() * norm_cdf(d1)
}

/// Black-Scholes Delta (∂V/∂S) for a European put: e^(-qT) (Φ(d₁) - 1)
pub fn bs_put_delta(s: f64, k: f64, r: f64, q: f64, sigma: f64, t: f64) -> f64 {
    let (d1, _) = d1_d2(s, k, r, q, sigma, t);
    (-q * t).exp() * (norm_cdf(d1) - 1.0)
}
