pub mod config;
pub mod error;
pub mod logging;

pub mod navigation;
pub mod resource;
pub mod simulate;
pub mod throttle;
pub mod upstream;
