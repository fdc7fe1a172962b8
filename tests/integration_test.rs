// tests/integration_test.rs
use exotic_mc::analytics::{bs_analytic, geometric};
use exotic_mc::mc::config::{AsianSpec, BasketSpec, OptionKind};
use exotic_mc::mc::mc_engine::{mc_price_asian, mc_price_basket};

#[test]
fn test_asian_cv_agrees_with_plain_mc() {
    let base = AsianSpec {
        s0: 100.0,
        k: 100.0,
        r: 0.05,
        sigma: 0.2,
        t: 1.0,
        steps: 252,
        paths: 10_000,
        seed: 42,
        ..Default::default()
    };

    let plain = mc_price_asian(&AsianSpec {
        use_control_variate: false,
        ..base.clone()
    })
    .expect("Valid configuration");
    let controlled = mc_price_asian(&AsianSpec {
        use_control_variate: true,
        ..base
    })
    .expect("Valid configuration");

    println!("\nAsian plain: {} ± {}", plain.price, plain.std_error);
    println!("Asian CV:    {} ± {}", controlled.price, controlled.std_error);

    // Same estimand, so the two estimates must agree within combined errors
    let diff = (plain.price - controlled.price).abs();
    let tolerance = 4.0 * (plain.std_error + controlled.std_error);
    assert!(
        diff < tolerance,
        "plain and CV prices disagree: diff {} tolerance {}",
        diff,
        tolerance
    );
}

#[test]
fn test_asian_cv_reduces_variance() {
    let base = AsianSpec {
        paths: 10_000,
        steps: 100,
        seed: 43,
        ..Default::default()
    };

    let plain = mc_price_asian(&AsianSpec {
        use_control_variate: false,
        ..base.clone()
    })
    .expect("Valid configuration");
    let controlled = mc_price_asian(&AsianSpec {
        use_control_variate: true,
        ..base
    })
    .expect("Valid configuration");

    let vrf = (plain.std_error / controlled.std_error).powi(2);
    println!("\nVariance Reduction Factor (Asian): {}", vrf);

    // The geometric control is highly correlated with the arithmetic payoff;
    // anything below a handful of times reduction means the pairing is broken
    assert!(
        controlled.std_error < plain.std_error,
        "control variate did not reduce the standard error ({} >= {})",
        controlled.std_error,
        plain.std_error
    );
    assert!(vrf > 2.0, "Variance Reduction Factor too small: {}", vrf);
}

#[test]
fn test_asian_zero_volatility_is_deterministic() {
    let spec = AsianSpec {
        s0: 100.0,
        k: 100.0,
        r: 0.05,
        q: 0.0,
        sigma: 0.0,
        t: 1.0,
        steps: 50,
        paths: 2_000,
        seed: 1,
        ..Default::default()
    };

    let result = mc_price_asian(&spec).expect("Valid configuration");

    // Noiseless forward path: S_i = S0 * exp(r * i * dt)
    let dt = spec.t / spec.steps as f64;
    let mean: f64 = (1..=spec.steps)
        .map(|i| spec.s0 * (spec.r * i as f64 * dt).exp())
        .sum::<f64>()
        / spec.steps as f64;
    let expected = (-spec.r * spec.t).exp() * (mean - spec.k).max(0.0);

    println!("\nZero-vol Asian: {} expected {}", result.price, expected);
    assert!(
        (result.price - expected).abs() < 1e-9,
        "price {} expected {}",
        result.price,
        expected
    );
    assert!(
        result.std_error < 1e-6,
        "deterministic payoff must have (near-)zero standard error, got {}",
        result.std_error
    );
}

#[test]
fn test_asian_put_call_parity_at_the_money() {
    // S = K, r = q = 0: E[average] = K, so call and put values coincide
    let base = AsianSpec {
        s0: 100.0,
        k: 100.0,
        r: 0.0,
        q: 0.0,
        sigma: 0.2,
        t: 1.0,
        steps: 50,
        paths: 10_000,
        use_control_variate: false,
        seed: 7,
        ..Default::default()
    };

    let call = mc_price_asian(&AsianSpec {
        kind: OptionKind::Call,
        ..base.clone()
    })
    .expect("Valid configuration");
    let put = mc_price_asian(&AsianSpec {
        kind: OptionKind::Put,
        ..base
    })
    .expect("Valid configuration");

    let diff = (call.price - put.price).abs();
    let tolerance = 4.0 * (call.std_error + put.std_error);
    println!("\nParity diff {} tolerance {}", diff, tolerance);
    assert!(diff < tolerance, "parity violated: {} > {}", diff, tolerance);
}

#[test]
fn test_degenerate_basket_matches_european() {
    // Identical assets, perfect correlation: the basket is a single asset
    // and the geometric control equals the arithmetic payoff exactly, so
    // the controlled estimate collapses onto the closed form.
    let spec = BasketSpec {
        s1: 100.0,
        s2: 100.0,
        k: 100.0,
        r: 0.05,
        q: 0.0,
        sigma1: 0.3,
        sigma2: 0.3,
        rho: 1.0,
        t: 3.0,
        paths: 5_000,
        kind: OptionKind::Call,
        use_control_variate: true,
        seed: 42,
    };

    let result = mc_price_basket(&spec).expect("Valid configuration");
    let european = bs_analytic::bs_call_price(100.0, 100.0, 0.05, 0.0, 0.3, 3.0);

    println!("\nDegenerate basket {} European {}", result.price, european);
    assert!(
        (result.price - european).abs() < 1e-6,
        "basket {} european {}",
        result.price,
        european
    );
    assert!(result.std_error < 1e-6);
}

#[test]
fn test_basket_cv_reduces_variance() {
    let base = BasketSpec {
        paths: 10_000,
        seed: 11,
        ..Default::default()
    };

    let plain = mc_price_basket(&BasketSpec {
        use_control_variate: false,
        ..base.clone()
    })
    .expect("Valid configuration");
    let controlled = mc_price_basket(&BasketSpec {
        use_control_variate: true,
        ..base
    })
    .expect("Valid configuration");

    println!(
        "\nBasket stderr plain {} controlled {}",
        plain.std_error, controlled.std_error
    );
    assert!(controlled.std_error < plain.std_error);
}

#[test]
fn test_basket_price_between_geometric_and_european_bounds() {
    let spec = BasketSpec {
        paths: 20_000,
        seed: 3,
        ..Default::default()
    };
    let result = mc_price_basket(&spec).expect("Valid configuration");

    // Arithmetic mean dominates geometric mean pathwise, so the arithmetic
    // basket call must not price below the geometric closed form
    let geo = geometric::geometric_basket_price(
        spec.s1,
        spec.s2,
        spec.k,
        spec.r,
        spec.q,
        spec.sigma1,
        spec.sigma2,
        spec.rho,
        spec.t,
        spec.kind,
    );

    println!("\nBasket MC {} geometric floor {}", result.price, geo);
    assert!(result.price + 4.0 * result.std_error > geo);
}
