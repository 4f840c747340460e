use proclab_core::resource::{pin_to_cpu, renice_self};
use proclab_process::{NiceValue, ProcResult};
use std::thread;
use std::time::Duration;
use syscall_trace::syscall_trace;

/// Sleeps the calling process. Other processes keep running.
pub fn sleep(duration: Duration) {
    debug!("[sleep] {:?}", duration);
    thread::sleep(duration);
}

/// Adds `increment` to the caller's nice value.
#[syscall_trace]
pub fn nice(increment: i32) -> ProcResult<NiceValue> {
    renice_self(increment)
}

/// Binds the caller to one CPU.
#[syscall_trace]
pub fn set_affinity(cpu: usize) -> ProcResult<()> {
    pin_to_cpu(cpu)
}
