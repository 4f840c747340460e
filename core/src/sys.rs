use axerrno::LinuxError;
use proclab_process::{ProcError, ProcResult};
use std::io;
use syscalls::Errno;

/// Converts the raw errno carried by a failed syscall.
pub fn linux_error(errno: Errno) -> LinuxError {
    LinuxError::try_from(errno.into_raw()).unwrap_or(LinuxError::EIO)
}

/// Extracts the errno behind an I/O error, if the kernel produced one.
pub fn io_errno(err: &io::Error) -> Option<LinuxError> {
    err.raw_os_error()
        .and_then(|code| LinuxError::try_from(code).ok())
}

/// Maps a failed auxiliary syscall to [`ProcError::Sys`], logging the refusal.
pub fn check(op: &'static str, result: Result<usize, Errno>) -> ProcResult<usize> {
    result.map_err(|errno| {
        let errno = linux_error(errno);
        warn!("[sys] {} => {:?}", op, errno);
        ProcError::Sys { op, errno }
    })
}
