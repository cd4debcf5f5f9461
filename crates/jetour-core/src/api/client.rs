use serde_json::Value;
use url::Url;

use super::envelope::Envelope;
use super::transport::{ApiRequest, CurlTransport, Method, Transport};
use crate::config::{BlindBoxConfig, RightsConfig, WorkerConfig};
use crate::error::WorkerError;

/// Client for the loyalty API. Each operation lives in its own module as an
/// `impl` block on this type.
pub struct JetourClient<T: Transport = CurlTransport> {
    transport: T,
    base_url: Url,
    pub(super) sign_in_path: String,
    pub(super) blind_box: BlindBoxConfig,
    pub(super) rights: RightsConfig,
}

impl JetourClient<CurlTransport> {
    pub fn from_config(cfg: &WorkerConfig) -> Result<Self, WorkerError> {
        Self::with_transport(CurlTransport::from_config(&cfg.http), cfg)
    }
}

impl<T: Transport> JetourClient<T> {
    pub fn with_transport(transport: T, cfg: &WorkerConfig) -> Result<Self, WorkerError> {
        let base_url = Url::parse(&cfg.http.base_url).map_err(|e| {
            WorkerError::Config(format!("无效的 base_url {}: {}", cfg.http.base_url, e))
        })?;
        Ok(Self {
            transport,
            base_url,
            sign_in_path: cfg.http.sign_in_path.clone(),
            blind_box: cfg.blind_box.clone(),
            rights: cfg.rights.clone(),
        })
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub(super) fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<String, WorkerError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| WorkerError::Config(format!("无效的接口路径 {}: {}", path, e)))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url.into())
    }

    /// Issue one call and unwrap the envelope's `data`. Non-2xx and unparseable
    /// bodies are transport errors; a failing envelope is an application error
    /// prefixed with `failure`.
    pub(super) fn call(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
        failure: &str,
    ) -> Result<Value, WorkerError> {
        let url = self.endpoint(path, query)?;
        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| WorkerError::Application(format!("请求体序列化失败: {}", e)))?;
        let response = self.transport.send(&ApiRequest { method, url, body })?;
        if !response.is_success() {
            return Err(WorkerError::Transport(format!(
                "{} {} 返回 HTTP {}",
                method, path, response.status
            )));
        }
        Envelope::parse(&response.body)?.into_data(failure)
    }

    pub(super) fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
        failure: &str,
    ) -> Result<Value, WorkerError> {
        self.call(Method::Get, path, query, None, failure)
    }
}
