// src/mc/payoffs.rs
//! Payoff evaluation for completed paths.
//!
//! # Conventions
//!
//! All payoffs here are *undiscounted*; the discount factor e^(-rT) is
//! applied once at aggregation. Asian averages run over the observations
//! *excluding* t=0, matching the closed-form geometric prices in
//! `analytics::geometric` observation for observation; the control variate
//! is only unbiased because both legs use the identical convention.
//!
//! The arithmetic and geometric averages for a path are returned together
//! from a single call on the same price path. Pricing the two legs from
//! separate simulations would silently break the control-variate pairing,
//! so the API does not offer that option.

use super::barrier::BarrierState;
use super::config::OptionKind;

/// max(x - k, 0) for calls, max(k - x, 0) for puts
pub fn intrinsic(kind: OptionKind, k: f64, x: f64) -> f64 {
    match kind {
        OptionKind::Call => (x - k).max(0.0),
        OptionKind::Put => (k - x).max(0.0),
    }
}

/// Paired arithmetic/geometric payoffs from one underlying random draw
#[derive(Debug, Clone, Copy)]
pub struct PairedPayoff {
    pub arithmetic: f64,
    pub geometric: f64,
}

/// Arithmetic- and geometric-average payoffs of an Asian option on a
/// completed path `[S_0, S_1, ..., S_n]`.
pub fn asian_payoffs(path: &[f64], k: f64, kind: OptionKind) -> PairedPayoff {
    let observations = &path[1..];
    let n = observations.len() as f64;

    let arithmetic_mean = observations.iter().sum::<f64>() / n;
    let geometric_mean = (observations.iter().map(|s| s.ln()).sum::<f64>() / n).exp();

    PairedPayoff {
        arithmetic: intrinsic(kind, k, arithmetic_mean),
        geometric: intrinsic(kind, k, geometric_mean),
    }
}

/// Arithmetic- and geometric-average payoffs of a two-asset basket option
/// from the terminal prices of both assets.
pub fn basket_payoffs(s1_t: f64, s2_t: f64, k: f64, kind: OptionKind) -> PairedPayoff {
    let arithmetic_mean = 0.5 * (s1_t + s2_t);
    let geometric_mean = (s1_t * s2_t).sqrt();

    PairedPayoff {
        arithmetic: intrinsic(kind, k, arithmetic_mean),
        geometric: intrinsic(kind, k, geometric_mean),
    }
}

/// KIKO put payoff given the terminal barrier state.
///
/// Knock-out pays the cash rebate regardless of anything else; a knocked-in
/// path pays the vanilla put intrinsic at expiry; a path that touched
/// neither barrier pays nothing.
pub fn kiko_put_payoff(state: BarrierState, terminal: f64, k: f64, rebate: f64) -> f64 {
    match state {
        BarrierState::KnockedOut => rebate,
        BarrierState::KnockedIn => (k - terminal).max(0.0),
        BarrierState::Active => 0.0,
    }
}
