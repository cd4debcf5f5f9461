//! Blind boxes: count pending units and open up to the per-run cap.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::endpoints;
use super::envelope::{decode, lenient_i64};
use super::transport::{Method, Transport};
use super::JetourClient;
use crate::context::RunContext;
use crate::error::WorkerError;
use crate::outcome::Outcome;
use crate::retry::Sleeper;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlindBoxCount {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub total_count: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub opened_count: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub unopened_count: i64,
}

impl<T: Transport> JetourClient<T> {
    pub fn count_blind_boxes(&self, ctx: &mut RunContext) -> Result<BlindBoxCount, WorkerError> {
        let creds = &ctx.credentials;
        let data = self.get(
            endpoints::BLIND_BOX_COUNT,
            &[
                ("access_token", creds.access_token.as_str()),
                ("taskId", creds.task_id.as_str()),
            ],
            "获取盲盒信息失败",
        )?;
        decode(data, "盲盒")
    }

    /// Open one unit.
    ///
    /// The open call carries a fixed opaque `encryptParam` from config and does not
    /// address a specific unit.
    pub fn open_blind_box(&self, _ctx: &mut RunContext) -> Result<Outcome, WorkerError> {
        let data = self.call(
            Method::Put,
            endpoints::BLIND_BOX_RECEIVE,
            &[("encryptParam", self.blind_box.encrypt_param.as_str())],
            None,
            "",
        )?;
        Ok(Outcome::success("盲盒已拆").with_data(data))
    }

    /// Open `min(cap, unopened)` units with a random pause between requests.
    ///
    /// A unit rejected by the API is logged and skipped; a transport failure
    /// fails the whole stage.
    pub fn open_blind_boxes(
        &self,
        ctx: &mut RunContext,
        sleeper: &dyn Sleeper,
    ) -> Result<Outcome, WorkerError> {
        ctx.log.info("开始执行自动拆盲盒...");

        let count = self.count_blind_boxes(ctx)?;
        ctx.log.info(format!(
            "盲盒状态: 总数={}, 已拆={}, 未拆={}",
            count.total_count, count.opened_count, count.unopened_count
        ));

        if count.unopened_count <= 0 {
            ctx.log.info("没有未拆的盲盒");
            return Ok(Outcome::success("没有未拆的盲盒"));
        }

        let to_open = count
            .unopened_count
            .min(i64::from(self.blind_box.max_per_run));
        ctx.log.info(format!(
            "开始拆 {} 个未拆盲盒 (共 {} 个)...",
            to_open, count.unopened_count
        ));

        let mut opened = 0;
        for i in 1..=to_open {
            match self.open_blind_box(ctx) {
                Ok(_) => {
                    opened += 1;
                    ctx.log.success(format!("成功拆第 {} 个盲盒", i));
                }
                Err(WorkerError::Application(msg)) => {
                    ctx.log.error(format!("拆第 {} 个盲盒失败: {}", i, msg));
                }
                Err(e) => return Err(e),
            }
            if i < to_open {
                sleeper.sleep(self.pacing_delay());
            }
        }

        Ok(Outcome::success(format!("已拆 {} 个盲盒", opened)))
    }

    fn pacing_delay(&self) -> Duration {
        // Non-finite bounds (e.g. `inf` in TOML) collapse to no delay.
        let secs = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        let a = secs(self.blind_box.min_delay_secs);
        let b = secs(self.blind_box.max_delay_secs);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        Duration::from_secs_f64(rand::thread_rng().gen_range(lo..=hi))
    }
}
