//! Error types for the Fourier experiment crate.

use thiserror::Error;

/// Errors that can occur when running or post-processing Fourier
/// discrimination experiments.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FourierError {
    /// The experiment definition failed validation.
    #[error("Invalid experiment: {0}")]
    InvalidExperiment(String),

    /// Resolution was attempted while some jobs were still pending.
    ///
    /// Recoverable: retry once the listed jobs finish. The result document
    /// is left untouched.
    #[error("{} job(s) still pending: {}", .0.len(), .0.join(", "))]
    JobsNotReady(Vec<String>),

    /// A referenced job finished in a failed or cancelled state.
    ///
    /// Fatal for resolution: the experiment has to be re-run.
    #[error("Job {job_id} failed: {reason}")]
    JobFailed {
        /// Identifier of the failed job.
        job_id: String,
        /// Failure reason reported by the backend.
        reason: String,
    },

    /// The operation needs measured histograms but the document still holds
    /// job references.
    #[error("Result document holds unresolved job references; resolve it first")]
    NotResolved,

    /// The operation needs job references but the document already holds
    /// measured histograms.
    #[error("Result document is already resolved")]
    AlreadyResolved,

    /// Backend interaction failed.
    #[error(transparent)]
    Hal(#[from] qbench_hal::HalError),

    /// Circuit assembly or probability computation failed.
    #[error(transparent)]
    Scheme(#[from] qbench_schemes::SchemeError),
}

/// Result type for Fourier experiment operations.
pub type FourierResult<T> = Result<T, FourierError>;
