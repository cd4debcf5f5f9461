//! Response envelope `{status, message?, data}`; `status == 200` means success.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::WorkerError;

pub const SUCCESS_STATUS: i64 = 200;

#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub status: Value,
    /// Usually a string; some gateways send a number or an object.
    #[serde(default)]
    pub message: Value,
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    pub fn parse(body: &[u8]) -> Result<Self, WorkerError> {
        serde_json::from_slice(body)
            .map_err(|e| WorkerError::Transport(format!("响应不是有效的 JSON: {}", e)))
    }

    /// Status as an integer; some endpoints send it as a string.
    pub fn status_code(&self) -> Option<i64> {
        match &self.status {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code() == Some(SUCCESS_STATUS)
    }

    pub fn message_text(&self) -> Option<String> {
        match &self.message {
            Value::Null => None,
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Unwrap `data`, or turn the envelope into an `ApplicationError` whose text is
    /// `"{failure}: {message}"` (just the message when `failure` is empty).
    pub fn into_data(self, failure: &str) -> Result<Value, WorkerError> {
        if self.is_success() {
            return Ok(self.data);
        }
        let message = self
            .message_text()
            .unwrap_or_else(|| "未知错误".to_string());
        if failure.is_empty() {
            Err(WorkerError::Application(message))
        } else {
            Err(WorkerError::Application(format!("{}: {}", failure, message)))
        }
    }
}

/// Decode a `data` payload into a typed struct; `null` is treated as `{}` so that
/// `#[serde(default)]` structs come back with defaults.
pub fn decode<D: DeserializeOwned>(data: Value, what: &str) -> Result<D, WorkerError> {
    let data = if data.is_null() {
        Value::Object(Default::default())
    } else {
        data
    };
    serde_json::from_value(data)
        .map_err(|e| WorkerError::Application(format!("{}数据格式错误: {}", what, e)))
}

/// `null` decodes like an absent field: `T::default()`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `null` becomes `{}`; any other value is kept.
pub fn null_as_empty_object<'de, D>(deserializer: D) -> Result<Value, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => Value::Object(Map::new()),
        other => other,
    })
}

/// Accepts a number, numeric string or null; anything unusable becomes 0.
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_yields_data() {
        let env = Envelope::parse(br#"{"status":200,"data":{"isSigned":true}}"#).unwrap();
        assert!(env.is_success());
        assert_eq!(env.into_data("x").unwrap(), json!({"isSigned": true}));
    }

    #[test]
    fn string_status_is_accepted() {
        let env = Envelope::parse(br#"{"status":"200","data":null}"#).unwrap();
        assert!(env.is_success());
    }

    #[test]
    fn failure_envelope_is_application_error() {
        let env = Envelope::parse(r#"{"status":401,"message":"token失效"}"#.as_bytes()).unwrap();
        let err = env.into_data("获取签到信息失败").unwrap_err();
        assert!(matches!(err, WorkerError::Application(_)));
        assert_eq!(err.to_string(), "获取签到信息失败: token失效");
    }

    #[test]
    fn failure_without_message_uses_default() {
        let env = Envelope::parse(br#"{"status":500}"#).unwrap();
        assert_eq!(env.into_data("").unwrap_err().to_string(), "未知错误");
    }

    #[test]
    fn non_string_message_is_stringified() {
        let env = Envelope::parse(br#"{"status":500,"message":{"code":17}}"#).unwrap();
        let err = env.into_data("拆盲盒失败").unwrap_err();
        assert!(matches!(err, WorkerError::Application(_)));
        assert_eq!(err.to_string(), r#"拆盲盒失败: {"code":17}"#);

        let env = Envelope::parse(br#"{"status":500,"message":404}"#).unwrap();
        assert_eq!(env.into_data("").unwrap_err().to_string(), "404");
    }

    #[test]
    fn null_message_uses_default() {
        let env = Envelope::parse(br#"{"status":500,"message":null}"#).unwrap();
        assert_eq!(env.into_data("x").unwrap_err().to_string(), "x: 未知错误");
    }

    #[test]
    fn invalid_json_is_transport_error() {
        let err = Envelope::parse(b"<html>gateway</html>").unwrap_err();
        assert!(matches!(err, WorkerError::Transport(_)));
    }

    #[test]
    fn decode_null_as_defaults() {
        #[derive(Debug, Default, Deserialize)]
        #[serde(default, rename_all = "camelCase")]
        struct Count {
            #[serde(deserialize_with = "lenient_i64")]
            unopened_count: i64,
        }
        let c: Count = decode(Value::Null, "盲盒").unwrap();
        assert_eq!(c.unopened_count, 0);
        let c: Count = decode(json!({"unopenedCount": "3"}), "盲盒").unwrap();
        assert_eq!(c.unopened_count, 3);
        let c: Count = decode(json!({"unopenedCount": null}), "盲盒").unwrap();
        assert_eq!(c.unopened_count, 0);
    }

    #[test]
    fn null_fields_decode_as_defaults() {
        #[derive(Debug, Default, Deserialize)]
        #[serde(default, rename_all = "camelCase")]
        struct Flags {
            #[serde(deserialize_with = "null_as_default")]
            is_success: bool,
            #[serde(deserialize_with = "null_as_empty_object")]
            extra: Value,
        }
        let f: Flags = decode(json!({"isSuccess": null, "extra": null}), "x").unwrap();
        assert!(!f.is_success);
        assert_eq!(f.extra, json!({}));
        let f: Flags = decode(json!({"isSuccess": true, "extra": [1]}), "x").unwrap();
        assert!(f.is_success);
        assert_eq!(f.extra, json!([1]));
    }
}
