pub mod config;
pub mod logging;

pub mod api;
pub mod context;
pub mod error;
pub mod outcome;
pub mod output;
pub mod pipeline;
pub mod retry;
pub mod run_log;
pub mod sign_record;
pub mod snapshot;

pub use context::RunContext;
pub use error::WorkerError;
pub use outcome::Outcome;
