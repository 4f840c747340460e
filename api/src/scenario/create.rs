use super::spawn_all;
use crate::imp::task::{Reaped, WaitPid, reap};
use proclab_core::task::{current_pid, parent_pid};
use proclab_process::ProcResult;

#[derive(Debug, Clone)]
pub struct CreateConfig {
    pub children: usize,
}

impl Default for CreateConfig {
    fn default() -> Self {
        Self { children: 3 }
    }
}

/// Creates `children` processes. Each greets with its PID and its parent's
/// PID and exits; the parent reaps them one by one in creation order.
pub fn run(config: &CreateConfig) -> ProcResult<Vec<Reaped>> {
    let pids = spawn_all(config.children, |index| {
        println!(
            "Child (PID: {}) created by Parent (PPID: {}). Message: Hello from child {}",
            current_pid(),
            parent_pid(),
            index + 1
        );
        0
    })?;
    pids.into_iter()
        .map(|pid| reap(WaitPid::Pid(pid)))
        .collect()
}
