//! Point-in-time snapshot of campaign and check-in state (`sign-data.json`).

use chrono::Local;
use serde::Serialize;

use crate::api::{JetourClient, RewardInfo, TaskInfo, Transport};
use crate::context::RunContext;
use crate::error::WorkerError;
use crate::sign_record::{SignStats, YearMonth};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignSnapshot {
    /// ISO-8601 local time of collection.
    pub timestamp: String,
    pub task_info: TaskInfo,
    pub sign_record: String,
    pub sign_stats: SignStats,
    pub reward_info: RewardInfo,
}

/// Fetch task info, the month's check-in record and the sign page, and combine them.
pub fn collect<T: Transport>(
    client: &JetourClient<T>,
    ctx: &mut RunContext,
    month: Option<YearMonth>,
) -> Result<SignSnapshot, WorkerError> {
    let task_info = client.fetch_task_info(ctx)?;
    let record = client.fetch_sign_record(ctx, month)?;
    let page = client.fetch_sign_page(ctx)?;

    let sign_stats = record.stats();
    ctx.log.info(format!(
        "签到统计: 共 {} 天, 已签 {} 天, 补签 {} 天, 漏签 {} 天, 签到率 {}%",
        sign_stats.total_days,
        sign_stats.signed_days,
        sign_stats.makeup_days,
        sign_stats.missed_days,
        sign_stats.sign_rate
    ));

    Ok(SignSnapshot {
        timestamp: Local::now().to_rfc3339(),
        task_info,
        sign_record: record.record,
        sign_stats,
        reward_info: page.reward_info,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::endpoints;
    use crate::api::test_support::ScriptedTransport;
    use crate::config::{Credentials, WorkerConfig};
    use crate::run_log::RunLog;
    use serde_json::json;

    #[test]
    fn snapshot_combines_three_lookups() {
        let t = ScriptedTransport::new();
        t.respond_json(
            endpoints::TASK_LOAD,
            json!({"status": 200, "data": {"taskInfo": {"name": "签到有礼", "id": "77"}}}),
        );
        t.respond_json(
            endpoints::SIGN_RECORD,
            json!({"status": 200, "data": {"signRecord": "101200"}}),
        );
        t.respond_json(
            endpoints::SIGN_PAGE,
            json!({"status": 200, "data": {"isSigned": true, "rewardInfo": {"pointReward": 3}}}),
        );
        let client = JetourClient::with_transport(t, &WorkerConfig::default()).unwrap();
        let mut ctx = RunContext::new(
            Credentials {
                access_token: "tok".into(),
                task_id: "77".into(),
                card_account_id: None,
            },
            RunLog::new(),
        );

        let snap = collect(&client, &mut ctx, None).unwrap();
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["taskInfo"]["name"], "签到有礼");
        assert_eq!(json["signRecord"], "101200");
        assert_eq!(json["signStats"]["totalDays"], 6);
        assert_eq!(json["signStats"]["signRate"], 50.0);
        assert_eq!(json["rewardInfo"]["pointReward"], 3);
        assert_eq!(json["rewardInfo"]["nextStageReward"], json!({}));
        assert!(chrono::DateTime::parse_from_rfc3339(&snap.timestamp).is_ok());
        assert!(ctx.log.contains("签到率 50%"));
    }
}
