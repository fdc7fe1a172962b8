// src/mc/barrier.rs
//! Knock-in/knock-out tracking for barrier options.
//!
//! The monitor is fed one observation at a time while the path is being
//! generated, so a knocked-out path can stop simulating early. Knock-out
//! takes precedence over knock-in in the KIKO payoff rule, which is why the
//! upper barrier is checked first on every observation.

/// Barrier state after some prefix of the path has been observed.
///
/// `KnockedOut` is terminal; `KnockedIn` is sticky but can still be
/// superseded by a later knock-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarrierState {
    Active,
    KnockedIn,
    KnockedOut,
}

#[derive(Debug, Clone, Copy)]
pub struct BarrierMonitor {
    lower: f64,
    upper: f64,
    knocked_in: bool,
    knocked_out: bool,
}

impl BarrierMonitor {
    pub fn new(lower: f64, upper: f64) -> Self {
        BarrierMonitor {
            lower,
            upper,
            knocked_in: false,
            knocked_out: false,
        }
    }

    /// Feed the next path observation and return the state after it.
    ///
    /// Once knocked out, further observations are ignored; callers may skip
    /// the remaining steps of the path entirely.
    pub fn observe(&mut self, s: f64) -> BarrierState {
        if !self.knocked_out {
            if s >= self.upper {
                self.knocked_out = true;
            } else if s <= self.lower {
                self.knocked_in = true;
            }
        }
        self.state()
    }

    pub fn state(&self) -> BarrierState {
        if self.knocked_out {
            BarrierState::KnockedOut
        } else if self.knocked_in {
            BarrierState::KnockedIn
        } else {
            BarrierState::Active
        }
    }

    pub fn is_knocked_out(&self) -> bool {
        self.knocked_out
    }
}
