//! `imgretry simulate` – load a simulated gallery and report the retries.

use anyhow::Result;
use imgretry_core::config::ImgretryConfig;
use imgretry_core::simulate::{run_simulation, SimulationParams, SimulationReport};

pub async fn run_simulate(cfg: &ImgretryConfig, images: Option<usize>, json: bool) -> Result<()> {
    let mut params = SimulationParams::from(cfg);
    if let Some(n) = images {
        params.images = n;
    }
    println!(
        "loading {} images against an upstream queue of {} / {}ms ...",
        params.images,
        params.limits.max_queued,
        params.limits.queue_timeout.as_millis()
    );
    let report = run_simulation(params).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(r: &SimulationReport) {
    println!("  images loaded      {} / {}", r.loaded, r.images);
    println!("  initial failures   {}", r.initial_failures);
    println!("  reloads scheduled  {}", r.reloads_scheduled);
    println!("  reloads fired      {}", r.reloads_fired);
    println!(
        "  upstream           {} admitted, {} rejected",
        r.upstream_admitted, r.upstream_rejected
    );
    println!("  most attempts      {}", r.max_attempts);
    println!("  elapsed            {:.1}s", r.elapsed_ms as f64 / 1000.0);
    if !r.completed {
        println!("  gave up before every image loaded");
    }
}
