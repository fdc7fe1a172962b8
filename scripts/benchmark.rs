// scripts/benchmark.rs
use exotic_mc::math_utils::Timer;
use exotic_mc::mc::config::{AsianSpec, KikoSpec};
use exotic_mc::mc::mc_engine::{mc_price_asian, mc_price_kiko_put};
use std::env;
use std::fs::File;
use std::io::Write;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_cores: usize,
    rayon_threads: usize,
    rustc_flags: String,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_cores: num_cpus::get(),
            rayon_threads: rayon::current_num_threads(),
            rustc_flags: env::var("RUSTFLAGS").unwrap_or_else(|_| "default".to_string()),
        }
    }
}

struct BenchRow {
    label: &'static str,
    paths: usize,
    price: f64,
    std_error: f64,
    elapsed_ms: f64,
}

impl BenchRow {
    fn paths_per_sec(&self) -> f64 {
        self.paths as f64 / (self.elapsed_ms / 1000.0)
    }
}

fn bench_asian(paths: usize) -> Result<BenchRow, Box<dyn std::error::Error>> {
    let spec = AsianSpec {
        paths,
        ..Default::default()
    };
    let mut timer = Timer::new();
    timer.start();
    let result = mc_price_asian(&spec)?;
    Ok(BenchRow {
        label: "asian_cv",
        paths,
        price: result.price,
        std_error: result.std_error,
        elapsed_ms: timer.elapsed_ms(),
    })
}

fn bench_kiko(paths: usize) -> Result<BenchRow, Box<dyn std::error::Error>> {
    let spec = KikoSpec {
        paths,
        ..Default::default()
    };
    let mut timer = Timer::new();
    timer.start();
    let result = mc_price_kiko_put(&spec)?;
    Ok(BenchRow {
        label: "kiko_qmc",
        paths,
        price: result.price,
        std_error: result.std_error,
        elapsed_ms: timer.elapsed_ms(),
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let info = SystemInfo::gather();
    println!("exotic-mc benchmark");
    println!(
        "  started: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("  os: {}", info.os);
    println!("  cpu cores: {}", info.cpu_cores);
    println!("  rayon threads: {}", info.rayon_threads);
    println!("  rustflags: {}\n", info.rustc_flags);

    let mut rows = Vec::new();
    for &paths in &[10_000usize, 100_000, 1_000_000] {
        rows.push(bench_asian(paths)?);
        rows.push(bench_kiko(paths)?);
    }

    println!(
        "{:<10} {:>10} {:>14} {:>12} {:>10} {:>14}",
        "bench", "paths", "price", "stderr", "ms", "paths/sec"
    );
    for row in &rows {
        println!(
            "{:<10} {:>10} {:>14.8} {:>12.6} {:>10.1} {:>14.0}",
            row.label,
            row.paths,
            row.price,
            row.std_error,
            row.elapsed_ms,
            row.paths_per_sec()
        );
    }

    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("bench_{}.csv", timestamp);
    let mut file = File::create(&filename)?;
    writeln!(file, "bench,paths,price,stderr,elapsed_ms,paths_per_sec")?;
    for row in &rows {
        writeln!(
            file,
            "{},{},{:.8},{:.6},{:.1},{:.0}",
            row.label,
            row.paths,
            row.price,
            row.std_error,
            row.elapsed_ms,
            row.paths_per_sec()
        )?;
    }
    println!("\nResults written to {}", filename);

    Ok(())
}
