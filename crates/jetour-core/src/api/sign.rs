//! Check-in: record lookup, sign page lookup and the idempotent sign-in.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::endpoints;
use super::envelope::{decode, lenient_i64, null_as_default, null_as_empty_object};
use super::transport::{Method, Transport};
use super::JetourClient;
use crate::context::RunContext;
use crate::error::WorkerError;
use crate::outcome::Outcome;
use crate::sign_record::{SignRecord, SignStats, YearMonth};

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// Reward snapshot from the sign page; absent numbers are 0, absent objects `{}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardInfo {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub point_reward: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub member_reward: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub cycle_type: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub continuous_days: i64,
    #[serde(default = "empty_object", deserialize_with = "null_as_empty_object")]
    pub next_stage_reward: Value,
}

impl Default for RewardInfo {
    fn default() -> Self {
        Self {
            point_reward: 0,
            member_reward: 0,
            cycle_type: 0,
            continuous_days: 0,
            next_stage_reward: empty_object(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignPage {
    #[serde(deserialize_with = "null_as_default")]
    pub is_signed: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub reward_info: RewardInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SignRecordData {
    sign_record: Option<String>,
    #[serde(deserialize_with = "lenient_i64")]
    month_days: i64,
}

/// One month of check-in tags plus the number of days in that month.
#[derive(Debug, Clone, PartialEq)]
pub struct SignRecordPage {
    pub month: YearMonth,
    pub record: String,
    pub month_days: u32,
}

impl SignRecordPage {
    pub fn stats(&self) -> SignStats {
        SignRecord::parse(&self.record).stats()
    }
}

impl<T: Transport> JetourClient<T> {
    /// Check-in record for `month` (current month when `None`).
    pub fn fetch_sign_record(
        &self,
        ctx: &mut RunContext,
        month: Option<YearMonth>,
    ) -> Result<SignRecordPage, WorkerError> {
        let month = month.unwrap_or_else(YearMonth::current);
        let month_param = month.to_string();
        let creds = &ctx.credentials;
        let data = self.get(
            endpoints::SIGN_RECORD,
            &[
                ("access_token", creds.access_token.as_str()),
                ("taskId", creds.task_id.as_str()),
                ("monthInYear", month_param.as_str()),
            ],
            "获取签到记录失败",
        )?;
        let parsed: SignRecordData = decode(data, "签到记录")?;
        let page = SignRecordPage {
            month,
            record: parsed.sign_record.unwrap_or_default(),
            month_days: u32::try_from(parsed.month_days)
                .ok()
                .filter(|d| *d > 0)
                .unwrap_or_else(|| month.days_in_month()),
        };
        ctx.log.info(format!(
            "签到记录获取成功: {} ({} 天)",
            month_param, page.month_days
        ));
        Ok(page)
    }

    pub fn fetch_sign_page(&self, ctx: &mut RunContext) -> Result<SignPage, WorkerError> {
        let creds = &ctx.credentials;
        let data = self.get(
            endpoints::SIGN_PAGE,
            &[
                ("access_token", creds.access_token.as_str()),
                ("taskId", creds.task_id.as_str()),
            ],
            "获取签到信息失败",
        )?;
        decode(data, "签到页面")
    }

    /// Sign in for today. Already signed is a successful no-op with no write call.
    pub fn perform_sign_in(&self, ctx: &mut RunContext) -> Result<Outcome, WorkerError> {
        ctx.log.info("开始执行自动签到...");

        let page = self.fetch_sign_page(ctx)?;
        if page.is_signed {
            ctx.log.info("今日已签到，跳过签到操作");
            return Ok(Outcome::success("今日已签到"));
        }

        ctx.log.info("今日未签到，执行签到操作");
        let creds = &ctx.credentials;
        let body = json!({ "taskId": creds.task_id });
        let data = self.call(
            Method::Post,
            &self.sign_in_path,
            &[
                ("access_token", creds.access_token.as_str()),
                ("taskId", creds.task_id.as_str()),
            ],
            Some(&body),
            "签到失败",
        )?;
        ctx.log.success("签到成功！");
        Ok(Outcome::success("签到成功").with_data(data))
    }
}
