//! Error taxonomy shared by remote operations and the retry runner.

use thiserror::Error;

/// Failure of a remote operation or of worker setup.
///
/// `Transport` and `Application` are both retried by the runner; `Config` never is.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// Missing or invalid credentials/configuration. Fatal.
    #[error("配置错误: {0}")]
    Config(String),
    /// Network failure, timeout, non-2xx status or a body that is not JSON.
    #[error("{0}")]
    Transport(String),
    /// Well-formed response whose envelope reports a business failure.
    #[error("{0}")]
    Application(String),
}

impl WorkerError {
    pub fn is_retryable(&self) -> bool {
        !matches!(self, WorkerError::Config(_))
    }
}

impl From<curl::Error> for WorkerError {
    fn from(e: curl::Error) -> Self {
        let kind = if e.is_operation_timedout() {
            "请求超时"
        } else if e.is_couldnt_connect() || e.is_couldnt_resolve_host() {
            "连接失败"
        } else {
            "网络错误"
        };
        WorkerError::Transport(format!("{}: {}", kind, e))
    }
}
