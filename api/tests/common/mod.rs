#![allow(dead_code)]

use std::sync::{Mutex, MutexGuard};
use syscalls::{Sysno, syscall};

/// Held by every test that creates children. A wildcard reap would
/// otherwise consume children that belong to a test running concurrently.
pub static FORK_LOCK: Mutex<()> = Mutex::new(());

/// Exit code of a forked check that could not set up its preconditions.
pub const SKIPPED: i32 = 77;

const NOBODY: usize = 65534;

pub fn serial() -> MutexGuard<'static, ()> {
    FORK_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn effective_uid() -> u32 {
    unsafe { syscall!(Sysno::geteuid) }.map_or(0, |uid| uid as u32)
}

/// Switches a root process to `nobody`, giving up every capability.
/// Returns whether the caller now runs unprivileged.
///
/// Only call this in a forked child: credentials set through the raw syscall
/// apply to the calling thread alone.
pub fn drop_privileges() -> bool {
    if effective_uid() != 0 {
        return true;
    }
    let dropped = unsafe {
        syscall!(Sysno::setgroups, 0usize, 0usize)
            .and_then(|_| syscall!(Sysno::setgid, NOBODY))
            .and_then(|_| syscall!(Sysno::setuid, NOBODY))
    };
    dropped.is_ok() && effective_uid() != 0
}
