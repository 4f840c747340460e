use crate::imp::proc::{ProcessReport, inspect};
use crate::imp::task::{Reaped, WaitPid, await_exit, exit, reap, sleep, spawn};
use proclab_core::task::current_pid;
use proclab_process::{Fork, Pid, ProcResult};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ZombieConfig {
    /// How long the terminated child is left unreaped.
    pub window: Duration,
    /// Whether to read the zombie's `/proc` entry during the window.
    pub inspect: bool,
}

impl Default for ZombieConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(10),
            inspect: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ZombieReport {
    pub child: Pid,
    /// The child as seen while it was a zombie.
    pub observed: Option<ProcessReport>,
    pub reaped: Reaped,
}

/// Creates a child that exits at once and leaves it unreaped for
/// `config.window`, then reaps it.
///
/// The parent waits for the termination without consuming it, so the
/// window starts only once the child really is a zombie.
pub fn run(config: &ZombieConfig) -> ProcResult<ZombieReport> {
    let child = match spawn()? {
        Fork::Child => {
            println!("Child (PID: {}) is exiting.", current_pid());
            exit(0)
        }
        Fork::Parent(pid) => pid,
    };

    await_exit(child)?;
    println!(
        "Parent (PID: {}) created a zombie child (PID: {}). Check with 'ps -el | grep defunct'.",
        current_pid(),
        child
    );

    let observed = if config.inspect {
        match inspect(child) {
            Ok(report) => {
                println!("{report}");
                Some(report)
            }
            Err(err) => {
                warn!("[zombie] could not inspect child {}: {}", child, err);
                None
            }
        }
    } else {
        None
    };

    sleep(config.window);
    let reaped = reap(WaitPid::Pid(child))?;
    println!("Parent reaped the zombie child: {reaped}.");
    Ok(ZombieReport {
        child,
        observed,
        reaped,
    })
}
