use crate::imp::task::{Reaped, WaitPid, exit, reap, sleep, spawn};
use proclab_core::task::{become_subreaper, current_pid, parent_pid};
use proclab_process::{Fork, Pid, ProcResult};
use std::time::Duration;

/// Exit code of an orphan that still saw its original parent after sleeping.
pub const NOT_REPARENTED: i32 = 1;

#[derive(Debug, Clone)]
pub struct OrphanConfig {
    /// How long the child sleeps before looking up its parent again.
    pub child_sleep: Duration,
    /// Adopt the orphan as a subreaper instead of leaving it to init.
    pub adopt: bool,
}

impl Default for OrphanConfig {
    fn default() -> Self {
        Self {
            child_sleep: Duration::from_secs(5),
            adopt: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrphanOutcome {
    /// The parent returned straight away; `child` is re-parented to the
    /// nearest subreaper or init, which reaps it.
    Abandoned { child: Pid },
    /// The caller stood in as subreaper and reaped both the short-lived
    /// parent and the orphan it left behind.
    Adopted { intermediate: Reaped, orphan: Reaped },
}

/// Body of the orphan. Reports its parent before and after sleeping.
///
/// With `expected` set, the exit code says whether the orphan ended up with
/// that parent.
fn orphan_child(original_parent: Pid, sleep_for: Duration, expected: Option<Pid>) -> i32 {
    println!(
        "Child (PID: {}) started. Parent PID: {}.",
        current_pid(),
        original_parent
    );
    sleep(sleep_for);
    let adopted_by = parent_pid();
    println!(
        "Child (PID: {}) is now an orphan. New Parent PID: {}.",
        current_pid(),
        adopted_by
    );
    match expected {
        Some(pid) if pid != adopted_by => NOT_REPARENTED,
        _ if adopted_by == original_parent => NOT_REPARENTED,
        _ => 0,
    }
}

/// Creates a child that outlives its parent.
///
/// In the default mode the calling process is the parent and simply returns;
/// the caller is expected to exit soon after. With `adopt`, the caller marks
/// itself a subreaper and an intermediate process plays the parent, so the
/// re-parenting can be observed and the orphan reaped from here.
pub fn run(config: &OrphanConfig) -> ProcResult<OrphanOutcome> {
    if config.adopt {
        adopt(config)
    } else {
        abandon(config)
    }
}

fn abandon(config: &OrphanConfig) -> ProcResult<OrphanOutcome> {
    let parent = current_pid();
    match spawn()? {
        Fork::Child => exit(orphan_child(parent, config.child_sleep, None)),
        Fork::Parent(child) => {
            println!(
                "Parent (PID: {}) is exiting, leaving child (PID: {}) as an orphan.",
                parent, child
            );
            Ok(OrphanOutcome::Abandoned { child })
        }
    }
}

fn adopt(config: &OrphanConfig) -> ProcResult<OrphanOutcome> {
    become_subreaper()?;
    let reaper = current_pid();

    let intermediate = match spawn()? {
        Fork::Child => {
            let parent = current_pid();
            match spawn() {
                Ok(Fork::Child) => exit(orphan_child(parent, config.child_sleep, Some(reaper))),
                Ok(Fork::Parent(child)) => {
                    println!(
                        "Parent (PID: {}) is exiting, leaving child (PID: {}) as an orphan.",
                        parent, child
                    );
                    exit(0)
                }
                Err(err) => {
                    eprintln!("Error: {err}");
                    exit(1)
                }
            }
        }
        Fork::Parent(pid) => pid,
    };

    let intermediate = reap(WaitPid::Pid(intermediate))?;
    let orphan = reap(WaitPid::Any)?;
    println!(
        "Subreaper (PID: {}) reaped the orphan: {}.",
        reaper, orphan
    );
    Ok(OrphanOutcome::Adopted {
        intermediate,
        orphan,
    })
}
