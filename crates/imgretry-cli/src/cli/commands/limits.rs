//! `imgretry limits` – show upstream limits and the reload interval.

use imgretry_core::config::ImgretryConfig;
use imgretry_core::throttle::RELOAD_INTERVAL;
use imgretry_core::upstream::UpstreamLimits;

pub fn run_limits(cfg: &ImgretryConfig) {
    let configured = cfg.upstream.limits();
    println!("{:<12} {:>10} {:>12} {:>12}", "UPSTREAM", "QUEUED", "TIMEOUT", "MIN SPACING");
    for (name, limits) in [("thumbor", UpstreamLimits::THUMBOR), ("configured", configured)] {
        println!(
            "{:<12} {:>10} {:>10}ms {:>10}ms",
            name,
            limits.max_queued,
            limits.queue_timeout.as_millis(),
            limits.min_spacing().as_millis()
        );
    }
    println!("reload interval: {}ms", RELOAD_INTERVAL.as_millis());
    if !configured.admits_interval(RELOAD_INTERVAL) {
        println!("warning: configured upstream drains slower than one request per reload interval");
    }
}
