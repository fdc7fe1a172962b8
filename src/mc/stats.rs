// src/mc/stats.rs
//! Mergeable payoff accumulators and the final estimation result.
//!
//! Workers accumulate sums over disjoint path ranges and the partial states
//! are merged afterwards; `merge` is associative and commutative, so the
//! result does not depend on how rayon schedules the batches. Discounting
//! happens once, at finalization.

use crate::error::{PricerError, PricerResult};

/// Plain running sums for a single payoff stream
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleStats {
    count: u64,
    sum: f64,
    sum_sq: f64,
}

impl SampleStats {
    pub fn record(&mut self, x: f64) {
        self.count += 1;
        self.sum += x;
        self.sum_sq += x * x;
    }

    pub fn merge(self, other: Self) -> Self {
        SampleStats {
            count: self.count + other.count,
            sum: self.sum + other.sum,
            sum_sq: self.sum_sq + other.sum_sq,
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }

    /// Unbiased sample variance (n - 1 denominator)
    pub fn sample_variance(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        let n = self.count as f64;
        let mean = self.sum / n;
        (self.sum_sq - n * mean * mean) / (n - 1.0)
    }
}

/// Running sums for a paired (target, control) payoff stream.
///
/// Accumulates the cross-product alongside the marginals so the optimal
/// control-variate coefficient and the controlled variance come out of a
/// single pass over the paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairedStats {
    count: u64,
    sum_x: f64,
    sum_y: f64,
    sum_xx: f64,
    sum_yy: f64,
    sum_xy: f64,
}

impl PairedStats {
    pub fn record(&mut self, x: f64, y: f64) {
        self.count += 1;
        self.sum_x += x;
        self.sum_y += y;
        self.sum_xx += x * x;
        self.sum_yy += y * y;
        self.sum_xy += x * y;
    }

    pub fn merge(self, other: Self) -> Self {
        PairedStats {
            count: self.count + other.count,
            sum_x: self.sum_x + other.sum_x,
            sum_y: self.sum_y + other.sum_y,
            sum_xx: self.sum_xx + other.sum_xx,
            sum_yy: self.sum_yy + other.sum_yy,
            sum_xy: self.sum_xy + other.sum_xy,
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean_x(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum_x / self.count as f64
        }
    }

    pub fn mean_y(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum_y / self.count as f64
        }
    }

    pub fn variance_x(&self) -> f64 {
        self.marginal(self.sum_x, self.sum_xx)
    }

    pub fn variance_y(&self) -> f64 {
        self.marginal(self.sum_y, self.sum_yy)
    }

    pub fn covariance(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        let n = self.count as f64;
        (self.sum_xy - self.sum_x * self.sum_y / n) / (n - 1.0)
    }

    /// Optimal control coefficient c = Cov(X,Y) / Var(Y), estimated from the
    /// sample. Zero when the control payoff is (numerically) constant, which
    /// turns the controlled estimator back into the plain one.
    pub fn control_coefficient(&self) -> f64 {
        let var_y = self.variance_y();
        if var_y > 1e-10 {
            self.covariance() / var_y
        } else {
            0.0
        }
    }

    /// Mean and sample variance of the controlled payoff
    /// Z = X - c (Y - anchor), where `anchor` is the exact undiscounted
    /// expectation of the control payoff.
    pub fn controlled_moments(&self, anchor: f64) -> (f64, f64) {
        let c = self.control_coefficient();
        let mean = self.mean_x() - c * (self.mean_y() - anchor);
        let variance =
            self.variance_x() - 2.0 * c * self.covariance() + c * c * self.variance_y();
        (mean, variance)
    }

    /// Mean and sample variance of the plain (uncontrolled) payoff
    pub fn plain_moments(&self) -> (f64, f64) {
        (self.mean_x(), self.variance_x())
    }

    fn marginal(&self, sum: f64, sum_sq: f64) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        let n = self.count as f64;
        let mean = sum / n;
        (sum_sq - n * mean * mean) / (n - 1.0)
    }
}

/// Final output of one pricing request
#[derive(Debug, Clone, PartialEq)]
pub struct EstimationResult {
    pub price: f64,
    pub std_error: f64,
    pub paths: usize,
    pub delta: Option<f64>,
}

impl EstimationResult {
    /// Builds the result from undiscounted payoff moments.
    ///
    /// Small negative variances from floating-point cancellation are clamped
    /// to zero; anything beyond tolerance, or a non-finite estimate, is a
    /// numerical-instability error rather than a silently corrupt result.
    pub fn from_moments(
        mean: f64,
        sample_variance: f64,
        paths: usize,
        discount: f64,
        method: &str,
    ) -> PricerResult<Self> {
        let mut variance = sample_variance;
        if variance < 0.0 {
            if variance > -1e-10 {
                variance = 0.0;
            } else {
                return Err(PricerError::NumericalInstability {
                    method: method.to_string(),
                    reason: format!(
                        "variance estimate became significantly negative: {}",
                        variance
                    ),
                });
            }
        }

        let price = discount * mean;
        let std_error = discount * (variance / paths as f64).sqrt();

        if !price.is_finite() {
            return Err(PricerError::NumericalInstability {
                method: method.to_string(),
                reason: format!("price estimate is not finite: {}", price),
            });
        }
        if !std_error.is_finite() {
            return Err(PricerError::NumericalInstability {
                method: method.to_string(),
                reason: format!("standard error is not finite: {}", std_error),
            });
        }

        Ok(EstimationResult {
            price,
            std_error,
            paths,
            delta: None,
        })
    }

    /// 95% confidence half-width, 1.96 standard errors
    pub fn ci_half_width(&self) -> f64 {
        1.96 * self.std_error
    }

    /// 95% confidence interval (lower, upper)
    pub fn confidence_interval(&self) -> (f64, f64) {
        let hw = self.ci_half_width();
        (self.price - hw, self.price + hw)
    }
}
