//! Remote operations against the loyalty API.
//!
//! Every call goes through a [`Transport`] (curl in production, an in-memory
//! script in tests), is checked for a 2xx status, and has its
//! `{status, message, data}` envelope unwrapped. Failures come back as
//! `WorkerError::Transport` or `WorkerError::Application` for the retry runner.

mod account;
mod blind_box;
mod client;
pub mod endpoints;
mod envelope;
mod rights;
mod sign;
mod task;
mod transport;

#[cfg(test)]
pub(crate) mod test_support;

pub use blind_box::BlindBoxCount;
pub use client::JetourClient;
pub use envelope::Envelope;
pub use sign::{RewardInfo, SignPage, SignRecordPage};
pub use task::TaskInfo;
pub use transport::{ApiRequest, ApiResponse, CurlTransport, Method, Transport};
