//! Per-run context handed to every remote operation.

use crate::config::Credentials;
use crate::error::WorkerError;
use crate::run_log::RunLog;

/// Owns the run's credentials and its attempt log. Created fresh per run.
#[derive(Debug)]
pub struct RunContext {
    pub credentials: Credentials,
    pub log: RunLog,
}

impl RunContext {
    pub fn new(credentials: Credentials, log: RunLog) -> Self {
        Self { credentials, log }
    }

    pub fn card_account_id(&self) -> Result<&str, WorkerError> {
        self.credentials
            .card_account_id
            .as_deref()
            .ok_or_else(|| WorkerError::Config("未设置 card_account_id".to_string()))
    }
}
