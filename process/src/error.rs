use crate::Pid;
use axerrno::LinuxError;
use std::io;
use thiserror::Error;

/// Every way a lifecycle operation can fail.
///
/// Each variant is recovered at the boundary of the operation that raised it
/// and turned into a message for the operator. None of them is retried.
#[derive(Debug, Error)]
pub enum ProcError {
    /// The kernel could not allocate a new process.
    #[error("cannot create process: {}", .0.as_str())]
    SpawnFailure(LinuxError),
    /// The image replacement target is missing or cannot be executed.
    #[error("cannot execute `{program}`: {}", .errno.as_str())]
    ExecFailure { program: String, errno: LinuxError },
    /// A reap was requested but no matching child exists.
    #[error("no child processes to wait for")]
    NoChildren,
    /// The inspected process does not exist.
    #[error("process {0} not found")]
    ProcessNotFound(Pid),
    /// The caller may not read the inspected process's metadata.
    #[error("access to process {0} denied")]
    AccessDenied(Pid),
    /// Malformed PID, task selector or option from the operator.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// An auxiliary syscall (priority, affinity, ...) was refused.
    #[error("{op} failed: {}", .errno.as_str())]
    Sys {
        op: &'static str,
        errno: LinuxError,
    },
    #[error("reading process metadata: {0}")]
    Io(#[from] io::Error),
}

pub type ProcResult<T> = Result<T, ProcError>;

impl ProcError {
    /// Status an exec child leaves behind when replacement fails,
    /// following the shell convention: 127 for "not found", 126 otherwise.
    pub fn exec_exit_code(&self) -> i32 {
        match self {
            ProcError::ExecFailure {
                errno: LinuxError::ENOENT | LinuxError::ENOTDIR,
                ..
            } => 127,
            _ => 126,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        ProcError::InvalidInput(message.into())
    }
}
