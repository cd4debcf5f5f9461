//! Retry loop: run an operation until success or the policy says stop.

use super::policy::{RetryDecision, RetryPolicy};
use super::sleep::Sleeper;
use crate::context::RunContext;
use crate::error::WorkerError;

/// Runs `op` until it succeeds or the retry policy says to stop.
///
/// Each failure is logged as one ERROR entry on the context's run log before the
/// backoff sleep (or before the final error is returned).
pub fn run_with_retry<T, F>(
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
    ctx: &mut RunContext,
    mut op: F,
) -> Result<T, WorkerError>
where
    F: FnMut(&mut RunContext) -> Result<T, WorkerError>,
{
    let mut attempts = 0u32;
    loop {
        match op(ctx) {
            Ok(value) => {
                if attempts > 0 {
                    tracing::debug!("operation succeeded after {} failed attempt(s)", attempts);
                }
                return Ok(value);
            }
            Err(e) => {
                attempts += 1;
                match policy.decide(attempts, &e) {
                    RetryDecision::RetryAfter(delay) => {
                        ctx.log.error(format!(
                            "执行失败 (重试 {}/{}): {}，{}秒后重试...",
                            attempts,
                            policy.max_retries,
                            e,
                            delay.as_secs()
                        ));
                        sleeper.sleep(delay);
                    }
                    RetryDecision::NoRetry if e.is_retryable() => {
                        ctx.log
                            .error(format!("执行失败，已达到最大重试次数: {}", e));
                        return Err(e);
                    }
                    RetryDecision::NoRetry => {
                        ctx.log.error(format!("执行失败: {}", e));
                        return Err(e);
                    }
                }
            }
        }
    }
}
