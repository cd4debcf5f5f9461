use serde_json::Value;

use super::endpoints;
use super::transport::Transport;
use super::JetourClient;
use crate::context::RunContext;
use crate::error::WorkerError;

impl<T: Transport> JetourClient<T> {
    /// Look up the member detail and return the id of the first linked card account.
    pub fn resolve_card_account_id(&self, ctx: &mut RunContext) -> Result<String, WorkerError> {
        let data = self.get(
            endpoints::MEMBER_DETAIL,
            &[("access_token", ctx.credentials.access_token.as_str())],
            "获取会员详情失败",
        )?;

        let first = data
            .get("cardAccountList")
            .and_then(Value::as_array)
            .and_then(|list| list.first())
            .ok_or_else(|| {
                WorkerError::Application("会员详情API响应中未找到 cardAccountList".to_string())
            })?;

        match first.get("id") {
            Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            _ => Err(WorkerError::Application(
                "卡账户信息中未找到 id 字段".to_string(),
            )),
        }
    }
}
