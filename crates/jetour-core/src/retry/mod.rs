//! Retry and backoff policy.
//!
//! Wraps any remote operation in a bounded retry loop with backoff so that the
//! pipeline stages and the snapshot extraction share one policy.

mod policy;
mod run;
mod sleep;

pub use policy::{RetryDecision, RetryPolicy};
pub use run::run_with_retry;
pub use sleep::{Sleeper, ThreadSleeper};
