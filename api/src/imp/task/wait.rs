use axerrno::LinuxError;
use bitflags::bitflags;
use core::fmt;
use linux_raw_sys::general::{P_PID, WEXITED, WNOHANG, WNOWAIT};
use proclab_core::sys::linux_error;
use proclab_process::{ExitStatus, Pid, ProcError, ProcResult};
use syscall_trace::syscall_trace;
use syscalls::{Errno, Sysno, syscall};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct WaitOptions: u32 {
        /// Do not block when there are no processes wishing to report status.
        const WNOHANG = WNOHANG;
        /// Report the status of selected processes which have terminated.
        const WEXITED = WEXITED;
        /// Don't reap, just poll status.
        const WNOWAIT = WNOWAIT;
    }
}

/// Which children a reap may consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitPid {
    /// Wait for any child process
    Any,
    /// Wait for the child whose process ID is equal to the value.
    Pid(Pid),
}

impl WaitPid {
    fn as_raw(self) -> i32 {
        match self {
            WaitPid::Any => -1,
            WaitPid::Pid(pid) => pid as i32,
        }
    }
}

impl fmt::Display for WaitPid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitPid::Any => f.write_str("any child"),
            WaitPid::Pid(pid) => write!(f, "child {pid}"),
        }
    }
}

/// A consumed exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reaped {
    pub pid: Pid,
    pub status: ExitStatus,
}

impl fmt::Display for Reaped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "process {} {}", self.pid, self.status)
    }
}

/// Maps a wait failure. `ECHILD` means there is nothing to wait for.
fn wait_error(op: &'static str, errno: Errno) -> ProcError {
    match linux_error(errno) {
        LinuxError::ECHILD => ProcError::NoChildren,
        errno => ProcError::Sys { op, errno },
    }
}

fn wait4(target: WaitPid, options: WaitOptions) -> ProcResult<Option<Reaped>> {
    let mut raw_status: i32 = 0;
    loop {
        let ret = unsafe {
            syscall!(
                Sysno::wait4,
                target.as_raw() as isize as usize,
                &mut raw_status as *mut i32 as usize,
                options.bits() as usize,
                0usize
            )
        };
        match ret {
            // WNOHANG and no matching child has changed state yet
            Ok(0) => return Ok(None),
            Ok(pid) => {
                return Ok(Some(Reaped {
                    pid: pid as Pid,
                    status: ExitStatus::from_raw(raw_status),
                }));
            }
            Err(Errno::EINTR) => continue,
            Err(errno) => return Err(wait_error("wait4", errno)),
        }
    }
}

/// Blocks until a child matching `target` terminates, then consumes its status.
///
/// A child that is already a zombie is returned immediately. Each status is
/// handed out once; afterwards the child no longer exists.
/// Among several terminated children, `WaitPid::Any` yields them in the order
/// the kernel reports, which need not be creation order.
///
/// # Errors
/// [`ProcError::NoChildren`] if no child matches `target`.
#[syscall_trace]
pub fn reap(target: WaitPid) -> ProcResult<Reaped> {
    wait4(target, WaitOptions::empty())?.ok_or(ProcError::NoChildren)
}

/// Like [`reap`], but returns `Ok(None)` instead of blocking when matching
/// children exist and none has terminated yet.
#[syscall_trace]
pub fn try_reap(target: WaitPid) -> ProcResult<Option<Reaped>> {
    wait4(target, WaitOptions::WNOHANG)
}

/// Blocks until child `pid` has terminated without consuming its status.
///
/// When this returns, the child is a zombie and stays one until reaped.
#[syscall_trace]
pub fn await_exit(pid: Pid) -> ProcResult<()> {
    // room for a `siginfo_t`, which is never larger than 128 bytes
    let mut info = [0u64; 16];
    let options = WaitOptions::WEXITED | WaitOptions::WNOWAIT;
    loop {
        let ret = unsafe {
            syscall!(
                Sysno::waitid,
                P_PID as usize,
                pid as usize,
                info.as_mut_ptr() as usize,
                options.bits() as usize,
                0usize
            )
        };
        match ret {
            Ok(_) => return Ok(()),
            Err(Errno::EINTR) => continue,
            Err(errno) => return Err(wait_error("waitid", errno)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_carry_kernel_bits() {
        assert_eq!(WaitOptions::WNOHANG.bits(), 1);
        assert_eq!(WaitOptions::WEXITED.bits(), 4);
        assert_eq!(WaitOptions::WNOWAIT.bits(), 0x0100_0000);
        assert_eq!(WaitOptions::all().bits(), 0x0100_0005);
    }

    #[test]
    fn wait_targets() {
        assert_eq!(WaitPid::Any.as_raw(), -1);
        assert_eq!(WaitPid::Pid(42).as_raw(), 42);
        assert_eq!(WaitPid::Pid(42).to_string(), "child 42");
    }

    #[test]
    fn echild_means_no_children() {
        assert!(matches!(wait_error("wait4", Errno::ECHILD), ProcError::NoChildren));
        assert!(matches!(
            wait_error("waitid", Errno::EINVAL),
            ProcError::Sys {
                op: "waitid",
                errno: LinuxError::EINVAL
            }
        ));
    }
}
