// demos/demo.rs
use exotic_mc::math_utils::Timer;
use exotic_mc::mc::config::{AsianSpec, BasketSpec, GreeksConfig, KikoSpec, OptionKind};
use exotic_mc::mc::mc_engine::{mc_price_asian, mc_price_basket, mc_price_kiko_put};
use exotic_mc::output;

fn main() {
    println!("Running exotic-mc Monte Carlo Demo\n");

    let mut timer = Timer::new();

    // Arithmetic Asian call, daily observations, geometric control variate
    let asian = AsianSpec {
        s0: 100.0,
        k: 100.0,
        r: 0.05,
        sigma: 0.2,
        t: 1.0,
        steps: 252,
        kind: OptionKind::Call,
        use_control_variate: true,
        ..Default::default()
    };
    timer.start();
    match mc_price_asian(&asian) {
        Ok(result) => {
            println!("{}", output::format_result("Arithmetic Asian call", &result));
            println!("  ({:.1} ms)\n", timer.elapsed_ms());
        }
        Err(e) => println!("Asian pricing failed: {}\n", e),
    }

    // Arithmetic basket call on two correlated assets
    let basket = BasketSpec {
        s1: 100.0,
        s2: 100.0,
        k: 100.0,
        r: 0.05,
        sigma1: 0.3,
        sigma2: 0.3,
        rho: 0.5,
        t: 3.0,
        kind: OptionKind::Call,
        use_control_variate: true,
        ..Default::default()
    };
    timer.start();
    match mc_price_basket(&basket) {
        Ok(result) => {
            println!("{}", output::format_result("Arithmetic basket call", &result));
            println!("  ({:.1} ms)\n", timer.elapsed_ms());
        }
        Err(e) => println!("Basket pricing failed: {}\n", e),
    }

    // KIKO put with daily barrier monitoring and delta
    let kiko = KikoSpec {
        s0: 100.0,
        k: 100.0,
        r: 0.05,
        sigma: 0.2,
        t: 1.0,
        lower: 90.0,
        upper: 110.0,
        rebate: 1.0,
        steps: 252,
        greeks: GreeksConfig::DELTA,
        ..Default::default()
    };
    timer.start();
    match mc_price_kiko_put(&kiko) {
        Ok(result) => {
            println!("{}", output::format_result("KIKO put", &result));
            println!("  ({:.1} ms)", timer.elapsed_ms());
        }
        Err(e) => println!("KIKO pricing failed: {}", e),
    }
}
