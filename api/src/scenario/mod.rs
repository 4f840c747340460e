//! Lifecycle demonstrations.
//!
//! Each one takes a plain config struct whose `Default` matches the classic
//! classroom values; tests shrink the delays and sizes. In every child branch
//! the demonstration ends the process itself, so only the original caller
//! ever returns from `run`.

pub mod create;
pub mod exec;
pub mod inspect;
pub mod orphan;
pub mod priority;
pub mod zombie;

use crate::imp::task::{WaitPid, exit, reap, spawn};
use proclab_process::{Fork, Pid, ProcResult};

/// Spawns `count` children. Child `index` runs `child(index)` and exits with
/// the returned code. Returns the children's PIDs in creation order.
///
/// If a spawn fails, the children created so far are reaped before the
/// error is returned, so no zombie is left behind.
fn spawn_all(count: usize, mut child: impl FnMut(usize) -> i32) -> ProcResult<Vec<Pid>> {
    let mut pids = Vec::with_capacity(count);
    for index in 0..count {
        match spawn() {
            Ok(Fork::Child) => exit(child(index)),
            Ok(Fork::Parent(pid)) => pids.push(pid),
            Err(err) => {
                for &pid in &pids {
                    let _ = reap(WaitPid::Pid(pid));
                }
                return Err(err);
            }
        }
    }
    Ok(pids)
}
