// src/output.rs
use crate::mc::stats::EstimationResult;
use std::fs::File;
use std::io::{self, Write};

/// Render a pricing result the way callers display it: price to 10 decimal
/// places, standard error, 95% confidence interval, and delta if present.
pub fn format_result(label: &str, result: &EstimationResult) -> String {
    let (lo, hi) = result.confidence_interval();
    let mut out = format!(
        "{}: price {:.10}\n  standard error {:.10}\n  95% CI [{:.10}, {:.10}] ({} paths)",
        label, result.price, result.std_error, lo, hi, result.paths
    );
    if let Some(delta) = result.delta {
        out.push_str(&format!("\n  delta {:.10}", delta));
    }
    out
}

pub fn write_results_to_csv(filename: &str, results: &[(&str, &EstimationResult)]) -> io::Result<()> {
    let mut file = File::create(filename)?;
    writeln!(file, "label,price,std_error,ci_low,ci_high,paths,delta")?;
    for (label, result) in results {
        let (lo, hi) = result.confidence_interval();
        let delta = result
            .delta
            .map(|d| format!("{:.10}", d))
            .unwrap_or_default();
        writeln!(
            file,
            "{},{:.10},{:.10},{:.10},{:.10},{},{}",
            label, result.price, result.std_error, lo, hi, result.paths, delta
        )?;
    }
    Ok(())
}

pub fn write_summary_to_csv(filename: &str, summary_data: &[(&str, &str)]) -> io::Result<()> {
    let mut file = File::create(filename)?;
    for (key, value) in summary_data {
        writeln!(file, "{},{}", key, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_result_ten_decimals() {
        let result = EstimationResult {
            price: 0.123456789012,
            std_error: 0.01,
            paths: 10_000,
            delta: None,
        };
        let text = format_result("kiko put", &result);
        assert!(text.contains("0.1234567890"));
        assert!(text.contains("95% CI"));
        assert!(!text.contains("delta"));
    }

    #[test]
    fn test_format_result_includes_delta_when_present() {
        let result = EstimationResult {
            price: 1.0,
            std_error: 0.0,
            paths: 1,
            delta: Some(-0.25),
        };
        let text = format_result("kiko put", &result);
        assert!(text.contains("delta -0.2500000000"));
    }
}
