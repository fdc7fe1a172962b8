// src/models/gbm.rs
//! Geometric Brownian motion under the risk-neutral measure, with a repo
//! rate `q` entering the drift: dS_t = (r - q) S_t dt + σ S_t dW_t.

#[derive(Debug, Clone, Copy)]
pub struct Gbm {
    pub r: f64,
    pub q: f64,
    pub sigma: f64,
}

impl Gbm {
    pub fn new(r: f64, q: f64, sigma: f64) -> Self {
        Gbm { r, q, sigma }
    }

    /// Exact one-step transition over `dt` given a standard normal draw.
    ///
    /// S_{t+dt} = S_t * exp((r - q - σ²/2) dt + σ √dt Z)
    pub fn exact_step(&self, s_t: f64, dt: f64, normal_draw: f64) -> f64 {
        s_t * ((self.r - self.q - 0.5 * self.sigma * self.sigma) * dt
            + self.sigma * dt.sqrt() * normal_draw)
            .exp()
    }

    /// Builds a full price path of `normals.len() + 1` observations,
    /// including the spot at t=0, with equal spacing `dt`.
    ///
    /// The path buffer is cleared and reused; callers keep memory at
    /// O(steps) no matter how many paths they run.
    pub fn fill_path(&self, s0: f64, dt: f64, normals: &[f64], path: &mut Vec<f64>) {
        path.clear();
        path.reserve(normals.len() + 1);
        path.push(s0);

        let mut current_s = s0;
        for &z in normals {
            current_s = self.exact_step(current_s, dt, z);
            path.push(current_s);
        }
    }
}

/// Correlate a pair of independent standard normals with coefficient `rho`
/// (two-asset Cholesky factor). Both assets in a basket advance from the
/// same draw column, so the correlation is exact rather than approximate.
pub fn correlate_pair(z1: f64, z_independent: f64, rho: f64) -> (f64, f64) {
    let z2 = rho * z1 + (1.0 - rho * rho).sqrt() * z_independent;
    (z1, z2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_step_zero_vol_is_deterministic_forward() {
        let gbm = Gbm::new(0.05, 0.01, 0.0);
        let s1 = gbm.exact_step(100.0, 1.0, 2.5);
        // Draw is irrelevant at zero volatility
        let s2 = gbm.exact_step(100.0, 1.0, -2.5);
        assert_eq!(s1, s2);
        assert!((s1 - 100.0 * (0.04_f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_fill_path_length_and_origin() {
        let gbm = Gbm::new(0.05, 0.0, 0.2);
        let normals = [0.1, -0.3, 0.7];
        let mut path = Vec::new();
        gbm.fill_path(100.0, 1.0 / 3.0, &normals, &mut path);

        assert_eq!(path.len(), 4);
        assert_eq!(path[0], 100.0);
        assert!(path.iter().all(|s| *s > 0.0));
    }

    #[test]
    fn test_correlate_pair_limits() {
        let (a, b) = correlate_pair(1.2, -0.4, 1.0);
        assert_eq!(a, b);

        let (_, b0) = correlate_pair(1.2, -0.4, 0.0);
        assert_eq!(b0, -0.4);
    }
}
