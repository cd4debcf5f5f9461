use serde::Deserialize;
use serde_json::json;

use super::endpoints;
use super::envelope::{decode, null_as_default};
use super::transport::{Method, Transport};
use super::JetourClient;
use crate::context::RunContext;
use crate::error::WorkerError;
use crate::outcome::Outcome;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ReceiveRightsData {
    #[serde(deserialize_with = "null_as_default")]
    is_success: bool,
    fail_message: Option<String>,
}

impl<T: Transport> JetourClient<T> {
    /// Claim the periodic entitlement. "Already claimed this period" is a success.
    pub fn receive_rights(&self, ctx: &mut RunContext) -> Result<Outcome, WorkerError> {
        ctx.log.info("开始执行自动领权益...");

        let card_account_id = ctx.card_account_id()?;
        let body = json!({
            "rightsId": self.rights.rights_id,
            "rightsPackageId": self.rights.rights_package_id,
            "rightsPackageCode": self.rights.rights_package_code,
            "number": self.rights.number,
            "cardAccountId": card_account_id,
        });
        let response = self.call(
            Method::Post,
            endpoints::RECEIVE_RIGHTS,
            &[
                ("access_token", ctx.credentials.access_token.as_str()),
                ("cardAccountId", card_account_id),
            ],
            Some(&body),
            "领取权益失败",
        );

        let marker = self.rights.already_claimed_marker.as_str();
        let data = match response {
            Ok(data) => data,
            Err(WorkerError::Application(msg)) if msg.contains(marker) => {
                ctx.log.info(format!("权益领取状态: {}", marker));
                return Ok(Outcome::success(marker));
            }
            Err(e) => return Err(e),
        };

        let result: ReceiveRightsData = decode(data, "领权益")?;
        if result.is_success {
            ctx.log.success("权益领取成功！");
            return Ok(Outcome::success("权益领取成功"));
        }

        let fail_message = result
            .fail_message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "领取失败".to_string());
        if fail_message.contains(marker) {
            ctx.log.info(format!("权益领取状态: {}", fail_message));
            Ok(Outcome::success(fail_message))
        } else {
            Err(WorkerError::Application(format!(
                "权益领取失败: {}",
                fail_message
            )))
        }
    }
}
