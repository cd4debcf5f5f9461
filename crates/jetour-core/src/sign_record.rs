//! Check-in record decoding.
//!
//! The API reports a month of check-ins as a string with one tag per day:
//! `'0'` missed, `'1'` signed, `'2'` made up (back-filled). Each tag is
//! classified on its own; the string is never parsed as a number.

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;
use std::fmt;

use crate::error::WorkerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStatus {
    Missed,
    Signed,
    MadeUp,
}

impl DayStatus {
    /// Unknown tags count as missed so that the per-status counts always sum to the length.
    pub fn from_tag(tag: char) -> Self {
        match tag {
            '1' => DayStatus::Signed,
            '2' => DayStatus::MadeUp,
            '0' => DayStatus::Missed,
            other => {
                tracing::debug!("unknown check-in tag {:?}, counted as missed", other);
                DayStatus::Missed
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignRecord {
    days: Vec<DayStatus>,
}

impl SignRecord {
    pub fn parse(raw: &str) -> Self {
        Self {
            days: raw.chars().map(DayStatus::from_tag).collect(),
        }
    }

    pub fn days(&self) -> &[DayStatus] {
        &self.days
    }

    pub fn stats(&self) -> SignStats {
        let mut stats = SignStats {
            total_days: self.days.len(),
            ..SignStats::default()
        };
        for day in &self.days {
            match day {
                DayStatus::Signed => stats.signed_days += 1,
                DayStatus::MadeUp => stats.makeup_days += 1,
                DayStatus::Missed => stats.missed_days += 1,
            }
        }
        if stats.total_days > 0 {
            let rate =
                (stats.signed_days + stats.makeup_days) as f64 / stats.total_days as f64 * 100.0;
            stats.sign_rate = (rate * 10.0).round() / 10.0;
        }
        stats
    }
}

/// Derived statistics, serialized with the API's camelCase names.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignStats {
    pub total_days: usize,
    pub signed_days: usize,
    pub makeup_days: usize,
    pub missed_days: usize,
    /// Percentage of signed plus made-up days, one decimal.
    pub sign_rate: f64,
}

pub fn calculate_sign_stats(raw: &str) -> SignStats {
    SignRecord::parse(raw).stats()
}

/// Calendar month used for the `monthInYear=YYYYMM` query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    first_day: NaiveDate,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, WorkerError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first_day| Self { first_day })
            .ok_or_else(|| WorkerError::Config(format!("无效的月份: {}{:02}", year, month)))
    }

    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            first_day: today.with_day(1).unwrap_or(today),
        }
    }

    /// Parse `YYYYMM`.
    pub fn parse(s: &str) -> Result<Self, WorkerError> {
        let s = s.trim();
        if s.len() != 6 || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(WorkerError::Config(format!("月份格式应为 YYYYMM: {}", s)));
        }
        let year: i32 = s[..4]
            .parse()
            .map_err(|_| WorkerError::Config(format!("无效的年份: {}", s)))?;
        let month: u32 = s[4..]
            .parse()
            .map_err(|_| WorkerError::Config(format!("无效的月份: {}", s)))?;
        Self::new(year, month)
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    pub fn days_in_month(&self) -> u32 {
        let next = if self.month() == 12 {
            NaiveDate::from_ymd_opt(self.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year(), self.month() + 1, 1)
        };
        next.map(|n| (n - self.first_day).num_days() as u32)
            .unwrap_or(31)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year(), self.month())
    }
}
