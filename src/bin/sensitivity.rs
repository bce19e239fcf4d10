//! Sensitivity sweep over benchmark rates and production ramp-up
//!
//! Projects a grid of input variants in parallel and prints how the
//! post-tax indicators respond. Accepts config via environment variables:
//!   INPUT_PATH, RATE_MIN, RATE_MAX, RATE_STEP, RAMP_SCALES

use std::env;
use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;

use capital_projection::inputs::loader;
use capital_projection::{ProjectInputs, ProjectionEngine};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let start = Instant::now();

    let base = match env::var("INPUT_PATH") {
        Ok(path) => loader::load_inputs(Path::new(&path))?,
        Err(_) => ProjectInputs::demo_project(),
    };

    let rate_min: f64 = env::var("RATE_MIN")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(6.0);
    let rate_max: f64 = env::var("RATE_MAX")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(12.0);
    let rate_step: f64 = env::var("RATE_STEP")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(1.0_f64)
        .max(0.1);

    // Ramp-up scalings applied to every configured production-rate year
    let ramp_scales: Vec<f64> = env::var("RAMP_SCALES")
        .ok()
        .map(|s| s.split(',').filter_map(|v| v.trim().parse().ok()).collect())
        .unwrap_or_else(|| vec![0.8, 0.9, 1.0]);

    let mut rates = Vec::new();
    let mut rate = rate_min;
    while rate <= rate_max + 1e-9 {
        rates.push(rate);
        rate += rate_step;
    }

    let variants: Vec<(f64, f64, ProjectInputs)> = ramp_scales
        .iter()
        .flat_map(|&scale| {
            let base = &base;
            rates.iter().map(move |&rate| {
                let mut inputs = base.clone();
                inputs.rates.post_tax_discount_rate = rate;
                for op_year in 1..=inputs.horizon.operation_years {
                    let scaled = base.production_rates.rate_for(op_year) * scale;
                    inputs.production_rates.set(op_year, scaled);
                }
                (scale, rate, inputs)
            })
        })
        .collect();

    let results: Vec<(f64, f64, f64, f64)> = variants
        .par_iter()
        .map(|(scale, rate, inputs)| {
            let output = ProjectionEngine::new(inputs.clone()).run();
            (
                *scale,
                *rate,
                output.indicators.post_tax.irr,
                output.indicators.post_tax.npv,
            )
        })
        .collect();

    println!(
        "{:>6} {:>8} {:>10} {:>14}",
        "Ramp", "Rate%", "IRR%", "NPV"
    );
    println!("{}", "-".repeat(42));
    for (scale, rate, irr, npv) in &results {
        println!("{:>6.2} {:>8.2} {:>10.2} {:>14.2}", scale, rate, irr, npv);
    }

    println!(
        "\n{} scenarios in {} ms",
        results.len(),
        start.elapsed().as_millis()
    );

    Ok(())
}
