use crate::{Pid, ProcError, ProcResult};
use core::fmt;
use std::path::PathBuf;

/// The two control paths out of a single process duplication.
///
/// The duplication happens once; which variant a process sees is derived from
/// the kernel's return value (0 in the new process, the new PID in the caller).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fork {
    /// Returned to the original process, carrying the new child's PID.
    Parent(Pid),
    /// Returned to the newly created process.
    Child,
}

impl Fork {
    pub fn from_raw(ret: usize) -> Self {
        match ret {
            0 => Fork::Child,
            pid => Fork::Parent(pid as Pid),
        }
    }

    pub fn is_child(&self) -> bool {
        matches!(self, Fork::Child)
    }
}

/// One open file descriptor of an inspected process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FdEntry {
    pub fd: u32,
    /// What the descriptor refers to (`/dev/pts/0`, `pipe:[1234]`, ...),
    /// if the link could be read.
    pub target: Option<PathBuf>,
}

impl fmt::Display for FdEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            Some(target) => write!(f, "{} -> {}", self.fd, target.display()),
            None => write!(f, "{}", self.fd),
        }
    }
}

/// Scheduling-priority bias. Lower means more CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NiceValue(i32);

impl NiceValue {
    pub const MIN: i32 = -20;
    pub const MAX: i32 = 19;

    /// Clamps into the range the kernel accepts.
    pub fn new(value: i32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// Converts the biased value returned by the raw `getpriority` syscall
    /// (`20 - nice`, always in `1..=40`).
    pub fn from_kernel_priority(prio: usize) -> Self {
        Self::new(20 - prio as i32)
    }

    pub fn get(self) -> i32 {
        self.0
    }

    /// The value reached by adding `increment`, saturating at the bounds.
    pub fn bumped(self, increment: i32) -> Self {
        Self::new(self.0.saturating_add(increment))
    }
}

impl fmt::Display for NiceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Parses an operator-supplied PID. Zero, negative and non-numeric input is rejected.
pub fn parse_pid(input: &str) -> ProcResult<Pid> {
    let input = input.trim();
    match input.parse::<Pid>() {
        Ok(0) => Err(ProcError::invalid("pid must be positive")),
        Ok(pid) => Ok(pid),
        Err(_) => Err(ProcError::invalid(format!("`{input}` is not a valid pid"))),
    }
}
