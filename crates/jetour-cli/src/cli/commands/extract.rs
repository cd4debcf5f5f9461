//! `jetour extract` – write the sign-data snapshot.

use anyhow::Result;
use jetour_core::api::JetourClient;
use jetour_core::config::{Credentials, WorkerConfig};
use jetour_core::output;
use jetour_core::retry::{run_with_retry, RetryPolicy, ThreadSleeper};
use jetour_core::run_log::RunLog;
use jetour_core::sign_record::YearMonth;
use jetour_core::snapshot;
use jetour_core::RunContext;
use std::path::Path;

pub fn run_extract(
    cfg: &WorkerConfig,
    creds: Credentials,
    output_dir: &Path,
    month: Option<&str>,
) -> Result<()> {
    let month = month.map(YearMonth::parse).transpose()?;
    let client = JetourClient::from_config(cfg)?;
    let policy = RetryPolicy::from(&cfg.retry);
    let mut ctx = RunContext::new(creds, RunLog::echoing());

    let snap = run_with_retry(&policy, &ThreadSleeper, &mut ctx, |ctx| {
        snapshot::collect(&client, ctx, month)
    })?;
    let path = output::write_sign_data(output_dir, &snap)?;

    println!();
    println!("  签到记录: {}", snap.sign_record);
    println!(
        "  签到统计: total={} signed={} makeup={} missed={} rate={}%",
        snap.sign_stats.total_days,
        snap.sign_stats.signed_days,
        snap.sign_stats.makeup_days,
        snap.sign_stats.missed_days,
        snap.sign_stats.sign_rate
    );
    println!("  saved: {}", path.display());
    Ok(())
}
