//! Kernel-visible process model.
//! Nothing in this crate talks to the kernel: it only names what the kernel reports.
//! A process is identified by a PID, has one parent, a run state and, once it
//! terminates, exactly one exit status that its parent may consume.
//! See https://man7.org/linux/man-pages/man2/wait.2.html for the status encoding.

pub mod error;
pub mod field;
pub mod process;
pub mod state;
pub mod status;

pub use error::{ProcError, ProcResult};
pub use field::{Field, Unavailable};
pub use process::{FdEntry, Fork, NiceValue, parse_pid};
pub use state::RunState;
pub use status::ExitStatus;

/// Type alias for process ID.
/// Linux uses `int` for PIDs, but a live PID is always positive.
pub type Pid = u32;
