use super::spawn_all;
use crate::imp::task::{WaitPid, nice, reap, set_affinity};
use crate::utils::workload::{DEFAULT_ITERATIONS, timed_burn};
use proclab_core::task::current_pid;
use proclab_process::{ExitStatus, Pid, ProcResult};

#[derive(Debug, Clone)]
pub struct PriorityConfig {
    /// Nice increment per child; one child is created for each entry.
    pub increments: Vec<i32>,
    /// Size of the identical workload every child runs.
    pub iterations: u64,
    /// CPU every child is pinned to, so that they actually compete.
    pub cpu: Option<usize>,
}

impl Default for PriorityConfig {
    fn default() -> Self {
        Self::with_children(3)
    }
}

impl PriorityConfig {
    /// `count` children with increments 0, 5, 10 and so on.
    pub fn with_children(count: usize) -> Self {
        Self {
            increments: (0..count).map(|i| i as i32 * 5).collect(),
            iterations: DEFAULT_ITERATIONS,
            cpu: Some(0),
        }
    }
}

/// One child's completion, in the order the parent observed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    /// 1-based position in reaping order.
    pub rank: usize,
    pub pid: Pid,
    /// The increment the child was configured with, if it is one of ours.
    pub increment: Option<i32>,
    pub status: ExitStatus,
}

fn child(index: usize, increment: i32, config: &PriorityConfig) -> i32 {
    if let Some(cpu) = config.cpu {
        if let Err(err) = set_affinity(cpu) {
            warn!("[priority] could not pin child {} to cpu {}: {}", index, cpu, err);
        }
    }
    let niceness = match nice(increment) {
        Ok(niceness) => niceness,
        Err(err) => {
            eprintln!("Error: {err}");
            return 1;
        }
    };
    println!(
        "Child {} (PID: {}) started with nice value {}.",
        index + 1,
        current_pid(),
        niceness
    );
    let (_, elapsed) = timed_burn(config.iterations);
    println!(
        "Child {} (PID: {}) finished after {:.3}s.",
        index + 1,
        current_pid(),
        elapsed.as_secs_f64()
    );
    0
}

/// Runs the same workload in one child per configured increment and records
/// the order in which they finish.
///
/// The order is only a tendency: lower nice values usually finish first when
/// the children share a CPU, but the scheduler gives no guarantee.
pub fn run(config: &PriorityConfig) -> ProcResult<Vec<Completion>> {
    let pids = spawn_all(config.increments.len(), |index| {
        child(index, config.increments[index], config)
    })?;

    let mut completions = Vec::with_capacity(pids.len());
    for rank in 1..=pids.len() {
        let reaped = reap(WaitPid::Any)?;
        let increment = pids
            .iter()
            .position(|&pid| pid == reaped.pid)
            .map(|index| config.increments[index]);
        println!(
            "#{} finished: PID {} (nice increment {}), {}",
            rank,
            reaped.pid,
            increment.map_or_else(|| "?".to_string(), |inc| inc.to_string()),
            reaped.status
        );
        completions.push(Completion {
            rank,
            pid: reaped.pid,
            increment,
            status: reaped.status,
        });
    }
    Ok(completions)
}
