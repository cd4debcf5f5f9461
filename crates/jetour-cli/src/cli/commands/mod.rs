//! CLI command handlers. Each command is in its own file.

mod extract;
mod run;
mod stats;

pub use extract::run_extract;
pub use run::run_worker;
pub use stats::run_stats;
