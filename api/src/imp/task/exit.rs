use crate::imp::task::flush_console;
use proclab_core::task::current_pid;
use syscalls::{Sysno, syscall};

/// Terminates the calling process with `code`.
///
/// Console output is flushed, then the whole process ends through
/// `exit_group`. Unlike `std::process::exit`, no atexit handlers run: a forked
/// child must not run cleanup that belongs to its parent's program.
pub fn exit(code: i32) -> ! {
    info!("[exit] process {} exiting with code {}", current_pid(), code);
    flush_console();
    let _ = unsafe { syscall!(Sysno::exit_group, code as isize as usize) };
    unreachable!("exit_group returned");
}
