//! CLI command handlers, one per file.

mod limits;
mod open;
mod schedule;
mod simulate;

pub use limits::run_limits;
pub use open::run_open;
pub use schedule::{run_schedule, MAX_FAILURE_OFFSET_MS};
pub use simulate::run_simulate;
