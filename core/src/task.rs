//! Identity of the calling process.
//!
//! Callers ask for these values once and pass the resulting [`Pid`] along
//! explicitly; after a fork the answer differs between the two branches.

use crate::sys::check;
use linux_raw_sys::prctl::PR_SET_CHILD_SUBREAPER;
use proclab_process::{Pid, ProcResult};
use syscalls::{Sysno, syscall};

/// PID of the calling process. `getpid` cannot fail.
pub fn current_pid() -> Pid {
    unsafe { syscall!(Sysno::getpid) }.map_or(0, |pid| pid as Pid)
}

/// PID of the calling process's current parent.
///
/// This is re-read from the kernel on every call: it changes when the
/// original parent terminates and the process is re-parented.
pub fn parent_pid() -> Pid {
    unsafe { syscall!(Sysno::getppid) }.map_or(0, |pid| pid as Pid)
}

/// Marks the calling process as a child subreaper.
///
/// Orphaned descendants are then re-parented to the caller instead of init,
/// so the caller can observe and reap them.
/// See <https://man7.org/linux/man-pages/man2/PR_SET_CHILD_SUBREAPER.2const.html>
pub fn become_subreaper() -> ProcResult<()> {
    check("prctl(PR_SET_CHILD_SUBREAPER)", unsafe {
        syscall!(Sysno::prctl, PR_SET_CHILD_SUBREAPER as usize, 1usize)
    })?;
    info!("[task] process {} is now a child subreaper", current_pid());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_stable() {
        let pid = current_pid();
        assert!(pid > 0);
        assert_eq!(pid, current_pid());
        assert_eq!(pid, std::process::id());
        assert_ne!(parent_pid(), pid);
    }
}
