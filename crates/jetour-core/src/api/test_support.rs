//! In-memory transport that replays canned responses per path.

use serde_json::Value;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use super::transport::{ApiRequest, ApiResponse, Transport};
use crate::error::WorkerError;

/// Responses are queued per URL path; the last queued response for a path repeats.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    routes: RefCell<HashMap<String, VecDeque<ApiResponse>>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, path: &str, status: u32, body: Vec<u8>) {
        self.routes
            .borrow_mut()
            .entry(path.to_string())
            .or_default()
            .push_back(ApiResponse { status, body });
    }

    pub(crate) fn respond_json(&self, path: &str, value: Value) {
        self.respond(path, 200, value.to_string().into_bytes());
    }

    pub(crate) fn respond_status(&self, path: &str, status: u32) {
        self.respond(path, status, Vec::new());
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub(crate) fn calls_to(&self, path: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|r| path_of(&r.url) == path)
            .count()
    }
}

fn path_of(url: &str) -> String {
    url::Url::parse(url)
        .map(|u| u.path().to_string())
        .unwrap_or_default()
}

impl Transport for ScriptedTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, WorkerError> {
        self.requests.borrow_mut().push(request.clone());
        let path = path_of(&request.url);
        let mut routes = self.routes.borrow_mut();
        let queue = routes
            .get_mut(&path)
            .ok_or_else(|| WorkerError::Transport(format!("连接失败: no route for {}", path)))?;
        let response = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        response.ok_or_else(|| WorkerError::Transport(format!("连接失败: empty route {}", path)))
    }
}
