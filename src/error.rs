//! Error types for td
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, unknown records, not logged in)
//! - 3: Blocked by policy (bad credentials, role/ownership gate, state machine)
//! - 4: Operation failed (store IO, lock timeout, malformed collection)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the td CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const POLICY_BLOCKED: i32 = 3;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for td operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Project name already exists: {0}")]
    DuplicateName(String),

    #[error("Account already exists: {0}")]
    DuplicateUsername(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Not logged in")]
    NotLoggedIn,

    // Policy blocks (exit code 3)
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not permitted: {0}")]
    Unauthorized(String),

    #[error("Task {task_id} is {status}: {action} not allowed")]
    InvalidTransition {
        task_id: String,
        status: String,
        action: String,
    },

    #[error("Task {0} can only be edited while pending")]
    InvalidStateForEdit(String),

    #[error("Account {username} owns {count} project(s): supply a successor")]
    HasOwnedProjects { username: String, count: usize },

    #[error("Cannot delete the last admin account: {0}")]
    LastAdmin(String),

    #[error("Cannot delete the bootstrap admin account: {0}")]
    BootstrapAdmin(String),

    #[error("{0} is disabled by configuration")]
    CapabilityDisabled(String),

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Lock acquisition timed out: {0}")]
    LockTimeout(PathBuf),

    #[error("Collection '{collection}' is unavailable: {reason}")]
    StoreUnavailable { collection: String, reason: String },

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::InvalidArgument(_)
            | Error::DuplicateName(_)
            | Error::DuplicateUsername(_)
            | Error::ProjectNotFound(_)
            | Error::AccountNotFound(_)
            | Error::TaskNotFound(_)
            | Error::UnknownCategory(_)
            | Error::NotLoggedIn => exit_codes::USER_ERROR,

            // Policy blocks
            Error::InvalidCredentials
            | Error::Unauthorized(_)
            | Error::InvalidTransition { .. }
            | Error::InvalidStateForEdit(_)
            | Error::HasOwnedProjects { .. }
            | Error::LastAdmin(_)
            | Error::BootstrapAdmin(_)
            | Error::CapabilityDisabled(_) => exit_codes::POLICY_BLOCKED,

            // Operation failures
            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::LockTimeout(_)
            | Error::StoreUnavailable { .. }
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Whether the failure is transient and worth retrying.
    ///
    /// Lock contention clears once the competing writer finishes; a
    /// malformed collection file will not fix itself.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::LockTimeout(_))
    }

    /// Structured details for the JSON error envelope, if any.
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::InvalidTransition {
                task_id,
                status,
                action,
            } => Some(serde_json::json!({
                "task_id": task_id,
                "status": status,
                "action": action,
            })),
            Error::HasOwnedProjects { username, count } => Some(serde_json::json!({
                "username": username,
                "owned_projects": count,
            })),
            _ => None,
        }
    }
}

/// Result type alias for td operations
pub type Result<T> = std::result::Result<T, Error>;
