//! `jetour run` – sign in, open blind boxes, claim rights.

use anyhow::{Context, Result};
use jetour_core::api::JetourClient;
use jetour_core::config::{Credentials, WorkerConfig};
use jetour_core::pipeline::Pipeline;
use jetour_core::retry::{RetryPolicy, ThreadSleeper};
use jetour_core::run_log::{LogLevel, RunLog};
use jetour_core::RunContext;
use std::path::Path;

pub fn run_worker(cfg: &WorkerConfig, creds: Credentials, output_dir: &Path) -> Result<()> {
    let client = JetourClient::from_config(cfg)?;
    let sleeper = ThreadSleeper;
    let pipeline = Pipeline::new(&client, RetryPolicy::from(&cfg.retry), &sleeper);
    let mut ctx = RunContext::new(creds, RunLog::echoing());

    let report = pipeline.run(&mut ctx, output_dir);

    println!();
    for (stage, outcome) in &report.completed {
        println!("  {:<6} {}", stage.label(), outcome.message);
    }
    println!(
        "  entries: {} info, {} success, {} error",
        ctx.log.count(LogLevel::Info),
        ctx.log.count(LogLevel::Success),
        ctx.log.count(LogLevel::Error)
    );
    if let Some(path) = &report.results_path {
        println!("  results: {}", path.display());
    }

    match report.failure {
        None => {
            tracing::info!("run completed {} stage(s)", report.completed.len());
            Ok(())
        }
        Some(failure) => {
            let stage = failure.stage.map(|s| s.label()).unwrap_or("初始化");
            Err(failure.error).with_context(|| format!("stage {} failed", stage))
        }
    }
}
