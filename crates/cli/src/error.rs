//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map `ClientError` variants and CLI-level failures to exit codes.
//!
//! Invariants:
//! - Exit codes 1-5 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use splunk_search_client::ClientError;
use thiserror::Error;

use crate::cancellation::SIGINT_EXIT_CODE;

/// Structured exit codes for `splunk-search`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,

    /// Unhandled or generic failure, including bad configuration.
    GeneralError = 1,

    /// Credentials missing or rejected.
    AuthenticationFailed = 2,

    /// The job does not exist (any more).
    NotFound = 3,

    /// The server answered with an unexpected status or an unreadable body,
    /// or the job itself failed.
    ApiError = 4,

    /// Network, TLS, timeout or URL failure before any response.
    ConnectionError = 5,

    /// Interrupted by Ctrl+C.
    Interrupted = SIGINT_EXIT_CODE,
}

impl ExitCode {
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

/// Failures raised by the CLI itself rather than the client library.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("search job {0} not found")]
    JobNotFound(String),

    #[error("result stream for {sid} ended early: {reason}")]
    StreamIncomplete { sid: String, reason: String },
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::AuthFailed(_) => ExitCode::AuthenticationFailed,
            ClientError::ApiError {
                status: 401 | 403, ..
            } => ExitCode::AuthenticationFailed,
            ClientError::ApiError { status: 404, .. } => ExitCode::NotFound,
            ClientError::ApiError { .. } => ExitCode::ApiError,
            ClientError::InvalidResponse(_) => ExitCode::ApiError,
            ClientError::JobFailed { .. } => ExitCode::ApiError,
            ClientError::HttpError(_) => ExitCode::ConnectionError,
            ClientError::InvalidUrl(_) => ExitCode::ConnectionError,
            ClientError::Cancelled => ExitCode::Interrupted,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns `ExitCode::GeneralError` when nothing in the chain is recognized.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(client_err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(client_err);
            }
            if let Some(cli_err) = cause.downcast_ref::<CliError>() {
                return match cli_err {
                    CliError::JobNotFound(_) => ExitCode::NotFound,
                    CliError::StreamIncomplete { .. } => ExitCode::ApiError,
                };
            }
        }
        ExitCode::GeneralError
    }
}
