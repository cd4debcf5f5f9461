use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::endpoints;
use super::envelope::decode;
use super::transport::Transport;
use super::JetourClient;
use crate::context::RunContext;
use crate::error::WorkerError;

/// Campaign metadata. The object is kept verbatim for the snapshot file; the
/// accessors pick out the fields the worker reports on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskInfo(pub Map<String, Value>);

impl TaskInfo {
    fn text(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|k| match self.0.get(*k) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
    }

    pub fn name(&self) -> Option<String> {
        self.text(&["name", "taskName"])
    }

    pub fn id(&self) -> Option<String> {
        self.text(&["id", "taskId"])
    }

    pub fn participant_count(&self) -> Option<i64> {
        ["participantCount", "joinCount", "joinNum"]
            .iter()
            .find_map(|k| self.0.get(*k).and_then(Value::as_i64))
    }

    pub fn rules(&self) -> Option<String> {
        self.text(&["rules", "ruleDesc", "rule"])
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl<T: Transport> JetourClient<T> {
    /// Campaign metadata from `data.taskInfo` (or `data` itself when not nested).
    pub fn fetch_task_info(&self, ctx: &mut RunContext) -> Result<TaskInfo, WorkerError> {
        let creds = &ctx.credentials;
        let mut data = self.get(
            endpoints::TASK_LOAD,
            &[
                ("access_token", creds.access_token.as_str()),
                ("taskId", creds.task_id.as_str()),
            ],
            "获取任务信息失败",
        )?;
        let nested = data.get_mut("taskInfo").map(Value::take);
        let info: TaskInfo = decode(nested.unwrap_or(data), "任务信息")?;
        ctx.log.info(format!(
            "任务信息获取成功: {}",
            info.name().unwrap_or_else(|| "-".to_string())
        ));
        Ok(info)
    }
}
