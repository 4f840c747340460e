use crate::imp::task::flush_console;
use linux_raw_sys::general::SIGCHLD;
use proclab_core::sys::linux_error;
use proclab_process::{Fork, ProcError, ProcResult};
use syscall_trace::syscall_trace;
use syscalls::{Sysno, syscall};

/// Duplicates the calling process.
///
/// This is `clone` with no sharing flags and `SIGCHLD` as the exit signal,
/// which is exactly what `fork` does. It is spelled as `clone` because some
/// architectures (aarch64, riscv64) have no `fork` syscall number.
/// The argument order after the flags differs between architectures
/// (see `CONFIG_CLONE_BACKWARDS`), but every one of them is zero here.
///
/// The parent's pending console output is flushed first, so that it is not
/// emitted a second time by the child.
///
/// # Errors
/// [`ProcError::SpawnFailure`] when the kernel cannot create the process
/// (`EAGAIN` on the process limit, `ENOMEM`).
#[syscall_trace]
pub fn spawn() -> ProcResult<Fork> {
    flush_console();
    let flags = SIGCHLD as usize;
    let ret = unsafe { syscall!(Sysno::clone, flags, 0usize, 0usize, 0usize, 0usize) }
        .map_err(|errno| {
            let errno = linux_error(errno);
            error!("[clone] kernel refused to create a process: {:?}", errno);
            ProcError::SpawnFailure(errno)
        })?;
    Ok(Fork::from_raw(ret))
}
