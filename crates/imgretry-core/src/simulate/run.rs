//! Drive a gallery page load against the simulated upstream.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::sync::watch;
use tokio::time::Instant;

use crate::config::ImgretryConfig;
use crate::resource::{ResourceHandle, ResourceId};
use crate::throttle::ReloadThrottler;
use crate::upstream::UpstreamLimits;

use super::image::SimulatedImage;
use super::upstream::SimulatedUpstream;

/// Parameters of one simulated page load.
#[derive(Debug, Clone, Copy)]
pub struct SimulationParams {
    pub limits: UpstreamLimits,
    pub images: usize,
    pub max_duration: Duration,
}

impl From<&ImgretryConfig> for SimulationParams {
    fn from(cfg: &ImgretryConfig) -> Self {
        Self {
            limits: cfg.upstream.limits(),
            images: cfg.simulate.images,
            max_duration: cfg.simulate.max_duration(),
        }
    }
}

/// Outcome of a simulated page load.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub images: usize,
    pub loaded: usize,
    /// Images whose first load was rejected.
    pub initial_failures: usize,
    pub reloads_scheduled: u64,
    pub reloads_fired: u64,
    pub upstream_admitted: u64,
    pub upstream_rejected: u64,
    /// Most load requests issued by a single image.
    pub max_attempts: u32,
    pub elapsed_ms: u64,
    /// False if `max_duration` ran out before every image loaded.
    pub completed: bool,
}

fn image_source(index: usize) -> String {
    format!("https://upload.wikimedia.org/wikipedia/commons/thumb/sim/{index}.jpg/250px-{index}.jpg")
}

/// Load `params.images` images at once, let the throttler retry the rejected
/// ones and wait until all are loaded or `params.max_duration` elapses.
///
/// Fails before loading anything if `params.max_duration` cannot be added to
/// the current instant.
pub async fn run_simulation(params: SimulationParams) -> Result<SimulationReport> {
    let started = Instant::now();
    let deadline = started
        .checked_add(params.max_duration)
        .with_context(|| format!("simulation max duration too large: {:?}", params.max_duration))?;
    let upstream = Arc::new(SimulatedUpstream::new(params.limits));
    let (loaded_tx, mut loaded_rx) = watch::channel(0usize);
    let loaded_tx = Arc::new(loaded_tx);

    let images: Vec<Arc<SimulatedImage>> = (0..params.images)
        .map(|i| {
            Arc::new(SimulatedImage::new(
                ResourceId(i as u64),
                image_source(i),
                Arc::clone(&upstream),
                Arc::clone(&loaded_tx),
            ))
        })
        .collect();

    let throttler = ReloadThrottler::current()?;
    throttler.initialize(
        images
            .iter()
            .map(|img| Arc::clone(img) as Arc<dyn ResourceHandle>),
    );

    for img in &images {
        img.load();
    }
    let initial_failures = images.iter().filter(|img| !img.is_loaded()).count();
    tracing::info!(
        images = params.images,
        initial_failures,
        "initial burst done"
    );

    let total = params.images;
    let completed =
        tokio::time::timeout_at(deadline, loaded_rx.wait_for(|n| *n >= total))
            .await
            .map(|r| r.is_ok())
            .unwrap_or(false);
    if !completed {
        tracing::warn!(
            pending = throttler.stats().pending(),
            "simulation stopped before every image loaded"
        );
    }

    let loaded = images.iter().filter(|img| img.is_loaded()).count();
    let report = SimulationReport {
        images: params.images,
        loaded,
        initial_failures,
        reloads_scheduled: throttler.stats().scheduled(),
        reloads_fired: throttler.stats().fired(),
        upstream_admitted: upstream.admitted(),
        upstream_rejected: upstream.rejected(),
        max_attempts: images.iter().map(|img| img.attempts()).max().unwrap_or(0),
        elapsed_ms: started.elapsed().as_millis() as u64,
        completed,
    };
    tracing::info!(?report, "simulation finished");
    Ok(report)
}
