//! `jetour stats` – decode a check-in record offline.

use anyhow::Result;
use jetour_core::sign_record::calculate_sign_stats;

pub fn run_stats(record: &str) -> Result<()> {
    let stats = calculate_sign_stats(record);
    println!("{:<12} {}", "totalDays", stats.total_days);
    println!("{:<12} {}", "signedDays", stats.signed_days);
    println!("{:<12} {}", "makeupDays", stats.makeup_days);
    println!("{:<12} {}", "missedDays", stats.missed_days);
    println!("{:<12} {:.1}%", "signRate", stats.sign_rate);
    Ok(())
}
