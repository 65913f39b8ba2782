//! In-process gallery simulation.
//!
//! Stands in for the browser: a thumbnail server with a bounded queue, image
//! elements that report failed loads, and a driver that fires the initial
//! burst the way a page full of lazily loaded thumbnails does.

mod image;
mod run;
mod upstream;

pub use image::SimulatedImage;
pub use run::{run_simulation, SimulationParams, SimulationReport};
pub use upstream::SimulatedUpstream;
