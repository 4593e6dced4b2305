//! Backend trait and configuration.
//!
//! The [`Backend`] trait defines the lifecycle for interacting with a
//! quantum backend:
//!
//! ```text
//!   submit() ──→ status() ──→ retrieve()
//!    (async)      (async)      (async)
//! ```
//!
//! ## Design principles
//!
//! - **Async-native**: all I/O methods are async.
//! - **Thread-safe**: `Send + Sync` bound enables shared ownership.
//! - **Batch-first**: `submit()` takes a slice of circuits and returns a
//!   single job ID covering the whole batch.
//! - **Order-preserving**: `retrieve()` MUST return exactly one histogram
//!   per submitted circuit, in submission order. Callers pair results with
//!   circuits positionally; no other correlation channel exists.
//!
//! ## Method table
//!
//! | Method | Kind | Required | Returns |
//! |--------|------|----------|---------|
//! | `name()` | sync | yes | `&str` |
//! | `max_batch_size()` | sync | provided | `Option<usize>` |
//! | `readout_error()` | sync | provided | `Option<ReadoutError>` |
//! | `submit()` | async | yes | `HalResult<JobId>` |
//! | `status()` | async | yes | `HalResult<JobStatus>` |
//! | `retrieve()` | async | yes | `HalResult<Vec<Histogram>>` |
//! | `wait()` | async | provided | `HalResult<Vec<Histogram>>` |
//! | `run()` | async | provided | `HalResult<Vec<Histogram>>` |

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use qbench_ir::Circuit;

use crate::error::HalResult;
use crate::job::{JobId, JobStatus};
use crate::result::Histogram;

/// Configuration for a backend instance.
#[derive(Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Name of the backend.
    pub name: String,
    /// API endpoint URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Authentication token.
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// Additional configuration.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BackendConfig {
    /// Create a new backend configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint: None,
            token: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Set the endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the authentication token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Add extra configuration.
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("name", &self.name)
            .field("endpoint", &self.endpoint)
            .field("token", &"[REDACTED]")
            .field("extra", &self.extra)
            .finish()
    }
}

/// Readout error rates for a single qubit.
///
/// `prob_meas1_prep0` is the probability of reading `1` after preparing
/// `|0⟩`; `prob_meas0_prep1` of reading `0` after preparing `|1⟩`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReadoutError {
    /// P(measure 1 | prepared 0).
    pub prob_meas1_prep0: f64,
    /// P(measure 0 | prepared 1).
    pub prob_meas0_prep1: f64,
}

impl ReadoutError {
    /// Create readout error rates.
    pub fn new(prob_meas1_prep0: f64, prob_meas0_prep1: f64) -> Self {
        Self {
            prob_meas1_prep0,
            prob_meas0_prep1,
        }
    }

    /// Check whether both rates are exactly zero.
    pub fn is_zero(&self) -> bool {
        self.prob_meas1_prep0 == 0.0 && self.prob_meas0_prep1 == 0.0
    }
}

/// Trait for quantum backends.
///
/// This trait defines the interface that all quantum backends MUST implement.
/// It covers the full job lifecycle: batch submission, status polling, and
/// result retrieval.
///
/// # Contract
///
/// - `submit()` MUST accept the whole batch or fail; partial submission is
///   not allowed. The job MUST start in `Queued` status.
/// - `retrieve()` MUST only be called when status is `Completed`, and MUST
///   return one histogram per submitted circuit, in submission order.
/// - `max_batch_size()` is a hard limit; callers split larger workloads
///   before calling `submit()`.
/// - `wait()` has a default implementation (500ms poll, 5-minute timeout).
#[async_trait]
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Maximum number of circuits accepted per `submit()` call.
    ///
    /// `None` means unlimited.
    fn max_batch_size(&self) -> Option<usize> {
        None
    }

    /// Calibrated readout error rates for a qubit, if the backend knows them.
    ///
    /// Backends without calibration data return `None`; mitigation is then
    /// unavailable for experiments run on them.
    fn readout_error(&self, qubit: u32) -> Option<ReadoutError> {
        let _ = qubit;
        None
    }

    /// Submit a batch of circuits for execution.
    ///
    /// Returns a single job ID covering the whole batch. The job MUST start
    /// in `Queued` status.
    async fn submit(&self, circuits: &[Circuit], shots: u32) -> HalResult<JobId>;

    /// Get the status of a job.
    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus>;

    /// Get the results of a completed job, one histogram per circuit in
    /// submission order.
    ///
    /// MUST only be called when `status()` returns `Completed`.
    async fn retrieve(&self, job_id: &JobId) -> HalResult<Vec<Histogram>>;

    /// Wait for a job to complete and return its results.
    ///
    /// Default implementation polls every 500ms for up to 5 minutes.
    async fn wait(&self, job_id: &JobId) -> HalResult<Vec<Histogram>> {
        use crate::error::HalError;
        use tokio::time::sleep;

        let poll_interval = Duration::from_millis(500);
        let max_polls = 600; // 5 minutes max

        for _ in 0..max_polls {
            let status = self.status(job_id).await?;

            match status {
                JobStatus::Completed => return self.retrieve(job_id).await,
                JobStatus::Failed(msg) => return Err(HalError::JobFailed(msg)),
                JobStatus::Cancelled => return Err(HalError::JobCancelled),
                JobStatus::Queued | JobStatus::Running => {
                    sleep(poll_interval).await;
                }
            }
        }

        Err(HalError::Timeout(job_id.0.clone()))
    }

    /// Submit a batch and block until its results are available.
    async fn run(&self, circuits: &[Circuit], shots: u32) -> HalResult<Vec<Histogram>> {
        let job_id = self.submit(circuits, shots).await?;
        self.wait(&job_id).await
    }
}

/// Trait for creating backends from configuration.
pub trait BackendFactory: Backend + Sized {
    /// Create a backend from configuration.
    fn from_config(config: BackendConfig) -> HalResult<Self>;
}
